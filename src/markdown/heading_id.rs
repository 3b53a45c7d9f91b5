//! GitHub-style heading identifiers

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use super::rule::SyncRule;
use crate::error::BoxError;

/// Turns heading text into unique slugs
///
/// Repeated slugs get `-1`, `-2`, ... suffixes, the way GitHub does it.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        while let Some(count) = self.seen.get_mut(&slug) {
            *count += 1;
            slug = format!("{}-{}", base, count);
        }
        self.seen.insert(slug.clone(), 0);
        slug
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}

/// Adds `id` attributes to headings that do not declare one
#[derive(Debug, Default)]
pub struct HeadingIdRule {
    prefix: String,
}

impl HeadingIdRule {
    pub const NAME: &'static str = "gfm-heading-id";

    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Text of the heading starting at `events[start]`
///
/// Inline HTML made only of character references (mangled email text)
/// counts as the text it encodes.
fn heading_text(events: &[Event<'_>], start: usize) -> String {
    let mut text = String::new();
    for event in &events[start + 1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::InlineHtml(html) => {
                if let Some(decoded) = decode_references(html) {
                    text.push_str(&decoded);
                }
            }
            _ => {}
        }
    }
    text
}

/// Decode a run of `&#NN;` / `&#xHH;` references; `None` for anything else
fn decode_references(html: &str) -> Option<String> {
    let mut decoded = String::new();
    let mut rest = html;
    while !rest.is_empty() {
        let (body, tail) = rest.strip_prefix("&#")?.split_once(';')?;
        let code = match body.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => body.parse().ok()?,
        };
        decoded.push(char::from_u32(code)?);
        rest = tail;
    }
    (!decoded.is_empty()).then_some(decoded)
}

impl SyncRule for HeadingIdRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform<'a>(&self, mut events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, BoxError> {
        // per render, so both modes produce the same ids
        let mut slugger = Slugger::new();

        for idx in 0..events.len() {
            if !matches!(events[idx], Event::Start(Tag::Heading { id: None, .. })) {
                continue;
            }
            let slug = slugger.slug(&heading_text(&events, idx));
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[idx] {
                *id = Some(CowStr::from(format!("{}{}", self.prefix, slug)));
            }
        }

        Ok(events)
    }
}
