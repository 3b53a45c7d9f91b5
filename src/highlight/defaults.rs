//! Base rules of the composite editor language

use super::rules::{rules_from, HighlightRule};

/// Markdown rules extension fragments are prepended to
pub fn default_markdown_rules() -> Vec<HighlightRule> {
    rules_from(&[
        (r"(?m)^ {0,3}(```|~~~)[^\n]*\n(?s:.*?)^ {0,3}(```|~~~)", "str"),
        (r"`[^`\n]+`", "str"),
        (r"(?m)^#{1,6} .*", "kwd"),
        (r"(?m)^>.*", "cmnt"),
        (r"\*\*[^*\n]+\*\*|__[^_\n]+__", "bool"),
        (r"\*[^*\n]+\*|_[^_\n]+_", "type"),
        (r"!?\[[^\]\n]*\]\([^)\n]*\)", "var"),
        (r"(?m)^\s*([-*+]|\d+\.)\s", "oper"),
    ])
}
