//! Highlight-rule fragments and the first-match scanner that evaluates them

use std::ops::Range;

use regex::Regex;

use super::markup::Span;

/// Capture group that, when present, delimits the classified token
///
/// Lets a pattern require trailing context without classifying it, e.g.
/// `(?P<token>\\sum)(?:[^a-zA-Z0-9]|$)`.
pub const TOKEN_GROUP: &str = "token";

/// One pattern/classification rule of a fragment language
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pub pattern: Regex,
    /// Token kind written as `shj-syn-{kind}`
    pub kind: String,
    token_group: bool,
}

impl HighlightRule {
    pub fn new(pattern: &str, kind: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(Regex::new(pattern)?, kind))
    }

    pub fn from_regex(pattern: Regex, kind: &str) -> Self {
        let token_group = pattern.capture_names().flatten().any(|name| name == TOKEN_GROUP);
        Self {
            pattern,
            kind: kind.to_string(),
            token_group,
        }
    }

    /// Range of the first token found at or after `at`
    fn find_at(&self, text: &str, at: usize) -> Option<Range<usize>> {
        if !self.token_group {
            return self.pattern.find_at(text, at).map(|m| m.range());
        }
        let caps = self.pattern.captures_at(text, at)?;
        caps.name(TOKEN_GROUP)
            .or_else(|| caps.get(0))
            .map(|m| m.range())
    }
}

/// Build rules from `(pattern, kind)` pairs, skipping patterns that fail to compile
///
/// Highlighting is cosmetic, so a bad pattern only costs its own rule.
pub fn rules_from(pairs: &[(&str, &str)]) -> Vec<HighlightRule> {
    pairs
        .iter()
        .filter_map(|(pattern, kind)| match HighlightRule::new(pattern, kind) {
            Ok(rule) => Some(rule),
            Err(e) => {
                tracing::warn!("Skipping highlight rule {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Next non-empty token of `rule` at or after `pos`
fn next_match(rule: &HighlightRule, text: &str, pos: usize) -> Option<(usize, usize)> {
    let mut at = pos;
    while at <= text.len() {
        let m = rule.find_at(text, at)?;
        if !m.is_empty() {
            return Some((m.start, m.end));
        }
        at = m.start + text[m.start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Classify `text` with an ordered rule list
///
/// At each position the earliest match among all rules wins; on equal start
/// the earlier rule wins. Text between matches stays unclassified.
pub(crate) fn scan<'a>(text: &str, rules: &'a [HighlightRule]) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    // Cached next match per rule, recomputed once the cursor passes it
    let mut pending: Vec<Option<(usize, usize)>> = rules
        .iter()
        .map(|rule| next_match(rule, text, 0))
        .collect();
    let mut pos = 0;

    loop {
        let mut best: Option<(usize, usize, usize)> = None;
        for (idx, rule) in rules.iter().enumerate() {
            if matches!(pending[idx], Some((start, _)) if start < pos) {
                pending[idx] = next_match(rule, text, pos);
            }
            if let Some((start, end)) = pending[idx] {
                if best.map_or(true, |(best_start, _, _)| start < best_start) {
                    best = Some((start, end, idx));
                }
            }
        }

        let Some((start, end, idx)) = best else {
            break;
        };

        if start > pos {
            spans.push(Span {
                range: pos..start,
                kind: None,
            });
        }
        spans.push(Span {
            range: start..end,
            kind: Some(rules[idx].kind.as_str()),
        });
        pos = end;
    }

    if pos < text.len() {
        spans.push(Span {
            range: pos..text.len(),
            kind: None,
        });
    }

    spans
}
