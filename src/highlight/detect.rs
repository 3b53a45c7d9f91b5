//! Language auto-detection
//!
//! Each language carries weighted regex features; a language's score is the
//! sum of `matches × weight`. Only languages scoring above the threshold
//! compete, and detection falls back to `plain`.

use std::sync::OnceLock;

use regex::Regex;

use super::PLAIN_LANGUAGE;

/// Minimum score for a language to be considered
const SCORE_THRESHOLD: usize = 20;

/// (language token, [(pattern, weight)])
const FEATURES: &[(&str, &[(&str, usize)])] = &[
    ("sh", &[(r"#!(/usr)?/bin/bash", 500), (r"\b(if|elif|then|fi|echo)\b|\$", 10)]),
    ("html", &[(r"</?[a-z-]+[^\n>]*>", 10), (r"^\s+<!DOCTYPE\s+html", 500)]),
    ("js", &[(r"\b(console|await|async|function|export|import|this|class|for|let|const|map|join|require)\b", 10)]),
    ("py", &[(r"\b(def|print|class|and|or|lambda)\b", 10)]),
    ("sql", &[(r"\b(SELECT|INSERT|FROM)\b", 50)]),
    ("pl", &[(r"#!(/usr)?/bin/perl", 500), (r"\b(use|print)\b|\$", 10)]),
    ("lua", &[(r"#!(/usr)?/bin/lua", 500)]),
    ("make", &[(r"(?m)\b(ifneq|endif|if|elif|then|fi|echo|\.PHONY)\b|^[a-z]+ ?:$|\$", 10)]),
    ("css", &[(r"(?m)^(@import|@page|@media|(\.|#)[a-z]+)", 20)]),
    ("diff", &[(r"(?m)^[+><-]", 10), (r"(?m)^@@ ?[-+,0-9 ]+ ?@@", 25)]),
    ("md", &[(r"(?m)^(>|\t\*|\t\d+\.)", 10), (r"\[.*\]\(.*\)", 10)]),
    ("xml", &[(r"</?[a-z-]+[^\n>]*>", 10), (r"^<\?xml", 500)]),
    ("c", &[(r"#include\b|\bprintf\s+\(", 100)]),
    ("rs", &[(r"(?m)^\s+(use|fn|mut|match)\b", 100)]),
    ("go", &[(r"\b(func|fmt|package)\b", 100)]),
    ("java", &[(r"(?m)^import\s+java", 500)]),
    ("json", &[(r#"\b(true|false|null)\b|\{\}|"[^"]+":"#, 10)]),
    ("yaml", &[(r"(?mi)^(\s+)?[a-z][a-z0-9]*:", 10)]),
];

type Detector = (&'static str, Vec<(Regex, usize)>);

fn detectors() -> &'static [Detector] {
    static DETECTORS: OnceLock<Vec<Detector>> = OnceLock::new();
    DETECTORS.get_or_init(|| {
        FEATURES
            .iter()
            .map(|(language, features)| {
                let compiled = features
                    .iter()
                    .filter_map(|(pattern, weight)| match Regex::new(pattern) {
                        Ok(re) => Some((re, *weight)),
                        Err(e) => {
                            tracing::warn!("Skipping detection feature for {}: {}", language, e);
                            None
                        }
                    })
                    .collect();
                (*language, compiled)
            })
            .collect()
    })
}

/// Score of every language for `code`, in table order
pub fn language_scores(code: &str) -> Vec<(&'static str, usize)> {
    detectors()
        .iter()
        .map(|(language, features)| {
            let score = features
                .iter()
                .map(|(re, weight)| re.find_iter(code).count() * weight)
                .sum();
            (*language, score)
        })
        .collect()
}

/// Best-guess language token for `code`, or `plain`
///
/// Ties keep table order.
pub fn detect_language(code: &str) -> &'static str {
    let mut best: Option<(&'static str, usize)> = None;
    for (language, score) in language_scores(code) {
        if score > SCORE_THRESHOLD && best.map_or(true, |(_, top)| score > top) {
            best = Some((language, score));
        }
    }
    best.map_or(PLAIN_LANGUAGE, |(language, _)| language)
}
