//! Line prefixes continued by the input surface on Enter
//!
//! A prefix detects itself at the start of the current line and produces the
//! text to insert at the start of the next line (`- `, `2. `, `> `, ...).

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;

/// Returns the matched prefix of a line, if the prefix applies
pub type PrefixDetect = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;
/// Builds the next line's prefix from the detected one and the full line
pub type PrefixMaker = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

#[derive(Clone)]
pub struct Prefix {
    /// Identifier used by `disable_prefixes`
    pub id: String,
    pub detect: PrefixDetect,
    pub make: PrefixMaker,
}

impl Prefix {
    pub fn new(
        id: &str,
        detect: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
        make: impl Fn(&str, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.to_string(),
            detect: Arc::new(detect),
            make: Arc::new(make),
        }
    }

    /// Text to start the next line with, when this prefix applies to `line`
    pub fn continuation(&self, line: &str) -> Option<String> {
        (self.detect)(line).map(|prev| (self.make)(&prev, line))
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prefix").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Identifiers of the default prefixes, usable in `disable_prefixes`
pub const DEFAULT_PREFIX_IDS: &[&str] = &["taskList", "bulletedList", "numberedList", "blockquote"];

pub fn default_prefixes() -> Vec<Prefix> {
    vec![
        Prefix::new(
            "taskList",
            |line| task_item()?.captures(line).map(|c| c[1].to_string()),
            |indent, _line| format!("{}- [ ] ", indent),
        ),
        Prefix::new(
            "bulletedList",
            |line| leading_match(bullet_item(), line),
            |prev, _line| prev.to_string(),
        ),
        Prefix::new(
            "numberedList",
            |line| {
                numbered_item()?
                    .captures(line)
                    .map(|c| format!("{}{}", &c[1], &c[2]))
            },
            |prev, _line| {
                let digits_at = prev.len() - prev.trim_start().len();
                let (indent, number) = prev.split_at(digits_at);
                let next = number.parse::<u64>().map(|n| n + 1).unwrap_or(1);
                format!("{}{}. ", indent, next)
            },
        ),
        Prefix::new(
            "blockquote",
            |line| leading_match(quote_line(), line),
            |prev, _line| prev.to_string(),
        ),
    ]
}

fn leading_match(pattern: Option<&Regex>, line: &str) -> Option<String> {
    pattern?.find(line).map(|m| m.as_str().to_string())
}

/// Compile `source` on first use; a bad pattern only disables its own prefix
fn compiled(slot: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    slot.get_or_init(|| match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Disabling prefix pattern {:?}: {}", source, e);
            None
        }
    })
    .as_ref()
}

fn task_item() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"^(\s*)[-*] \[[ xX]\] ")
}

fn bullet_item() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"^\s*[-*] ")
}

fn numbered_item() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"^(\s*)(\d+)\. ")
}

fn quote_line() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    compiled(&PATTERN, r"^\s*> ")
}
