//! Built-in languages backed by syntect
//!
//! The syntax set is expensive to deserialize, so it is loaded once, lazily.
//! Synchronous callers only ever see it if something already loaded it.

use std::sync::OnceLock;
use std::time::Instant;

use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use super::markup::{merge_adjacent, Span};

static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();

/// The syntax set, if it has been loaded
pub fn loaded() -> Option<&'static SyntaxSet> {
    SYNTAXES.get()
}

/// Load the syntax set on the current thread
pub fn load_blocking() -> &'static SyntaxSet {
    SYNTAXES.get_or_init(|| {
        let start = Instant::now();
        let set = SyntaxSet::load_defaults_newlines();
        tracing::debug!(
            "Loaded {} syntaxes in {:?}",
            set.syntaxes().len(),
            start.elapsed()
        );
        set
    })
}

/// Load the syntax set without stalling the async executor when possible
pub async fn load() -> &'static SyntaxSet {
    if let Some(set) = SYNTAXES.get() {
        return set;
    }

    if tokio::runtime::Handle::try_current().is_ok() {
        match tokio::task::spawn_blocking(load_blocking).await {
            Ok(set) => return set,
            Err(e) => tracing::warn!("Syntax loading task failed: {}", e),
        }
    }

    load_blocking()
}

/// Resolve a language token (`rs`, `json`, `python`, ...) to a syntax
pub fn find<'s>(set: &'s SyntaxSet, token: &str) -> Option<&'s SyntaxReference> {
    set.find_syntax_by_token(token)
}

/// Map a TextMate scope to a token kind
fn scope_kind(scope: &str) -> Option<&'static str> {
    if scope.starts_with("comment") {
        return Some("cmnt");
    }
    if scope.starts_with("constant.character.escape") {
        return Some("esc");
    }
    if scope.starts_with("string") {
        return Some("str");
    }
    if scope.starts_with("keyword.operator") || scope.starts_with("punctuation") {
        return Some("oper");
    }
    if scope.starts_with("keyword") || scope.starts_with("storage.modifier") {
        return Some("kwd");
    }
    if scope.starts_with("storage.type") || scope.starts_with("support.type") {
        return Some("type");
    }
    if scope.starts_with("entity.name.function")
        || scope.starts_with("support.function")
        || scope.starts_with("variable.function")
        || scope.starts_with("meta.function-call")
    {
        return Some("func");
    }
    if scope.starts_with("entity.name") || scope.starts_with("support.class") {
        return Some("class");
    }
    if scope.starts_with("constant.numeric") {
        return Some("num");
    }
    if scope.starts_with("constant.language") {
        return Some("bool");
    }
    if scope.starts_with("variable") || scope.starts_with("entity.other.attribute") {
        return Some("var");
    }
    None
}

/// Innermost scope that maps to a kind
fn stack_kind(scopes: &ScopeStack) -> Option<&'static str> {
    scopes
        .as_slice()
        .iter()
        .rev()
        .find_map(|scope| scope_kind(&scope.build_string()))
}

/// Classify `text` with a syntect syntax
///
/// Lines that fail to parse are emitted unclassified.
pub(crate) fn spans(text: &str, syntax: &SyntaxReference, set: &SyntaxSet) -> Vec<Span<'static>> {
    let mut state = ParseState::new(syntax);
    let mut scopes = ScopeStack::new();
    let mut spans = Vec::new();
    let mut line_start = 0;

    for line in text.split_inclusive('\n') {
        let ops = match state.parse_line(line, set) {
            Ok(ops) => ops,
            Err(e) => {
                tracing::trace!("Syntax parse error, line left plain: {}", e);
                spans.push(Span {
                    range: line_start..line_start + line.len(),
                    kind: None,
                });
                line_start += line.len();
                continue;
            }
        };

        let mut offset = 0;
        for (op_offset, op) in ops {
            let clamped = op_offset.min(line.len());
            if clamped > offset {
                spans.push(Span {
                    range: line_start + offset..line_start + clamped,
                    kind: stack_kind(&scopes),
                });
                offset = clamped;
            }
            if let Err(e) = scopes.apply(&op) {
                tracing::trace!("Scope stack error: {:?}", e);
            }
        }

        if offset < line.len() {
            spans.push(Span {
                range: line_start + offset..line_start + line.len(),
                kind: stack_kind(&scopes),
            });
        }

        line_start += line.len();
    }

    merge_adjacent(&mut spans);
    spans
}
