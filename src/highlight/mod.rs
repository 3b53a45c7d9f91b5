//! Syntax highlighting
//!
//! Two kinds of languages are served:
//!
//! - fragment languages, ordered regex rule lists held in a
//!   [`LanguageRegistry`] (the composite editor language `cartamd` is one)
//! - built-in languages resolved by token against syntect's default syntax set
//!
//! Both produce the same `shj-syn-*` markup. The syntax set is loaded lazily
//! and only by the async entry points; [`Highlighter::highlight_sync`] never
//! pays for it.

mod defaults;
mod detect;
mod markup;
mod registry;
mod rules;
pub mod syntaxes;

use std::sync::Arc;

pub use defaults::default_markdown_rules;
pub use detect::{detect_language, language_scores};
pub use registry::LanguageRegistry;
pub use rules::{rules_from, HighlightRule, TOKEN_GROUP};

/// Language id of the editor's own composite grammar
pub const COMPOSITE_LANGUAGE: &str = "cartamd";

/// Language that always succeeds with unclassified text
pub const PLAIN_LANGUAGE: &str = "plain";

/// Cloneable handle for highlighting against one registry
#[derive(Debug, Clone)]
pub struct Highlighter {
    registry: Arc<LanguageRegistry>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::global()
    }
}

impl Highlighter {
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self { registry }
    }

    /// Highlighter over the process-wide registry
    pub fn global() -> Self {
        Self::new(LanguageRegistry::global())
    }

    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Highlight `text` as `language`, loading built-in syntaxes if needed
    ///
    /// Returns `None` when the language is unknown.
    pub async fn highlight(
        &self,
        text: &str,
        language: &str,
        hide_line_numbers: bool,
    ) -> Option<String> {
        if let Some(html) = self.highlight_local(text, language, hide_line_numbers) {
            return Some(html);
        }

        let set = syntaxes::load().await;
        let syntax = syntaxes::find(set, language)?;
        let spans = syntaxes::spans(text, syntax, set);
        Some(markup::to_html(text, &spans, hide_line_numbers))
    }

    /// Highlight without ever loading the built-in syntax set
    ///
    /// Built-in languages resolve only once another path has loaded them.
    pub fn highlight_sync(
        &self,
        text: &str,
        language: &str,
        hide_line_numbers: bool,
    ) -> Option<String> {
        if let Some(html) = self.highlight_local(text, language, hide_line_numbers) {
            return Some(html);
        }

        let set = syntaxes::loaded()?;
        let syntax = syntaxes::find(set, language)?;
        let spans = syntaxes::spans(text, syntax, set);
        Some(markup::to_html(text, &spans, hide_line_numbers))
    }

    /// Highlight with a guessed language, degrading to `plain`
    pub async fn highlight_autodetect(&self, text: &str, hide_line_numbers: bool) -> String {
        let language = detect_language(text);
        tracing::trace!("Detected language '{}'", language);
        match self.highlight(text, language, hide_line_numbers).await {
            Some(html) => html,
            None => plain(text, hide_line_numbers),
        }
    }

    /// Register (or replace) a fragment language
    pub fn load_custom_language(&self, id: &str, rules: Vec<HighlightRule>) {
        self.registry.load_custom_language(id, rules);
    }

    /// Fragment languages and `plain`; no syntect involvement
    fn highlight_local(&self, text: &str, language: &str, hide_line_numbers: bool) -> Option<String> {
        if let Some(rules) = self.registry.get(language) {
            let spans = rules::scan(text, &rules);
            return Some(markup::to_html(text, &spans, hide_line_numbers));
        }
        if language == PLAIN_LANGUAGE {
            return Some(plain(text, hide_line_numbers));
        }
        None
    }
}

/// Escaped, unclassified highlight markup
pub fn plain(text: &str, hide_line_numbers: bool) -> String {
    markup::plain(text, hide_line_numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isolated() -> Highlighter {
        Highlighter::new(Arc::new(LanguageRegistry::new()))
    }

    #[test]
    fn test_sync_plain_always_succeeds() {
        let html = isolated().highlight_sync("a < b", PLAIN_LANGUAGE, true);
        assert_eq!(html.as_deref(), Some("a &lt; b"));
    }

    #[test]
    fn test_sync_custom_language() {
        let highlighter = isolated();
        highlighter.load_custom_language("tiny", rules_from(&[(r"\d+", "num")]));
        let html = highlighter.highlight_sync("x 42", "tiny", true);
        assert_eq!(html.as_deref(), Some("x <span class=\"shj-syn-num\">42</span>"));
    }

    #[test]
    fn test_sync_unknown_language_is_none() {
        assert!(isolated()
            .highlight_sync("x", "definitely-not-a-language", true)
            .is_none());
    }

    #[tokio::test]
    async fn test_async_loads_builtin_syntax() {
        let html = isolated().highlight("fn main() {}", "rs", true).await;
        assert!(html.is_some_and(|h| h.contains("shj-syn-")));
        // once loaded, the sync path sees it too
        assert!(syntaxes::loaded().is_some());
        assert!(isolated().highlight_sync("fn main() {}", "rs", true).is_some());
    }

    #[tokio::test]
    async fn test_autodetect_falls_back_to_plain() {
        let html = isolated().highlight_autodetect("hello there", true).await;
        assert_eq!(html, "hello there");
    }

    #[test]
    fn test_custom_language_shadows_builtin() {
        let highlighter = isolated();
        highlighter.load_custom_language("rs", rules_from(&[(r"fn", "kwd")]));
        let html = highlighter.highlight_sync("fn", "rs", true);
        assert_eq!(html.as_deref(), Some("<span class=\"shj-syn-kwd\">fn</span>"));
    }
}
