//! Highlight language loader tests

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use carta::highlight::{detect_language, rules_from, COMPOSITE_LANGUAGE, PLAIN_LANGUAGE};
use carta::{Carta, CartaOptions, ExtensionDescriptor, Highlighter, LanguageRegistry};
use common::isolated_options;

fn isolated_highlighter() -> Highlighter {
    Highlighter::new(Arc::new(LanguageRegistry::new()))
}

// ========================================================================
// Highlighter
// ========================================================================

#[tokio::test]
async fn test_unknown_language_is_none() {
    let highlighter = isolated_highlighter();
    assert!(highlighter
        .highlight("code", "not-a-real-language", true)
        .await
        .is_none());
    assert!(highlighter
        .highlight_sync("code", "not-a-real-language", true)
        .is_none());
}

#[tokio::test]
async fn test_autodetect_json_object_is_highlighted() {
    let json = r#"{"name": "carta", "private": true}"#;
    assert_eq!(detect_language(json), "json");
    let html = isolated_highlighter().highlight_autodetect(json, true).await;
    assert!(html.contains("shj-syn-"), "expected highlighted output, got {}", html);
}

#[tokio::test]
async fn test_autodetect_never_empty_for_non_empty_input() {
    let highlighter = isolated_highlighter();
    for input in ["x", "<<>>", "just words", "SELECT * FROM t", "fn main() {}"] {
        let html = highlighter.highlight_autodetect(input, true).await;
        assert!(!html.is_empty(), "empty output for {:?}", input);
    }
}

#[tokio::test]
async fn test_plain_language_with_line_numbers() {
    let html = isolated_highlighter()
        .highlight("a\nb", PLAIN_LANGUAGE, false)
        .await
        .unwrap();
    assert_eq!(
        html,
        "<div class=\"shj-numbers\"><div></div><div></div></div><div>a\nb</div>"
    );
}

// ========================================================================
// Composite language
// ========================================================================

#[tokio::test]
async fn test_composite_language_after_load() {
    let ext = ExtensionDescriptor::new("mentions").highlight_rules(rules_from(&[(r"@\w+", "func")]));
    let carta = Carta::new(isolated_options().extension(ext));
    assert!(carta.highlight_ready().await);

    let html = carta
        .highlighter()
        .highlight_sync("# Hi @carta", COMPOSITE_LANGUAGE, true)
        .unwrap();
    assert!(html.contains("<span class=\"shj-syn-kwd\"># Hi @carta</span>"));

    let html = carta
        .highlighter()
        .highlight_sync("ping @carta", COMPOSITE_LANGUAGE, true)
        .unwrap();
    assert_eq!(html, "ping <span class=\"shj-syn-func\">@carta</span>");
}

#[tokio::test]
async fn test_concurrent_instances_keep_their_fragments() {
    let registry = Arc::new(LanguageRegistry::new());

    let build = |kind: &'static str, pattern: &'static str| {
        let registry = Arc::clone(&registry);
        std::thread::spawn(move || {
            let ext = ExtensionDescriptor::new(kind).highlight_rules(rules_from(&[(pattern, kind)]));
            Carta::new(CartaOptions::new().registry(registry).extension(ext))
        })
    };
    let first = build("alpha", r"%%alpha");
    let second = build("beta", r"\$\$beta");
    let first = first.join().unwrap();
    let second = second.join().unwrap();

    assert!(first.highlight_ready().await);
    assert!(second.highlight_ready().await);

    let html = first
        .highlighter()
        .highlight_sync("%%alpha", COMPOSITE_LANGUAGE, true)
        .unwrap();
    assert_eq!(html, "<span class=\"shj-syn-alpha\">%%alpha</span>");

    let html = second
        .highlighter()
        .highlight_sync("$$beta", COMPOSITE_LANGUAGE, true)
        .unwrap();
    assert_eq!(html, "<span class=\"shj-syn-beta\">$$beta</span>");
}

// ========================================================================
// on_load hooks
// ========================================================================

#[test]
fn test_on_load_runs_once_with_highlighter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let ext = ExtensionDescriptor::new("loader").on_load(move |ctx| {
        seen.fetch_add(1, Ordering::SeqCst);
        ctx.highlight
            .load_custom_language("greeting", rules_from(&[(r"hello", "kwd")]));
        assert!(ctx.carta.extensions().iter().any(|e| e.name == "loader"));
    });

    let carta = Carta::new(isolated_options().extension(ext));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let html = carta
        .highlighter()
        .highlight_sync("hello world", "greeting", true)
        .unwrap();
    assert_eq!(html, "<span class=\"shj-syn-kwd\">hello</span> world");
}
