//! Registry merger tests
//!
//! Ordering of contributions across extensions and the default-exclusion
//! filters.

mod common;

use carta::highlight::rules_from;
use carta::icons::{Icon, DEFAULT_ICON_IDS};
use carta::keymap::{KeyboardShortcut, TextAction, DEFAULT_SHORTCUT_IDS};
use carta::prefixes::{Prefix, DEFAULT_PREFIX_IDS};
use carta::registry::merge;
use carta::{Carta, CartaConfig, Disable, ExtensionDescriptor};
use common::isolated_options;
use proptest::prelude::*;

/// Extension `n` contributing `count` items of every category
fn extension(n: usize, count: usize) -> ExtensionDescriptor {
    let mut ext = ExtensionDescriptor::new(&format!("ext{}", n));
    for i in 0..count {
        let id = format!("ext{}-{}", n, i);
        ext = ext
            .shortcut(KeyboardShortcut::parse(&id, "ctrl+alt+q", TextAction::Undo).unwrap())
            .icon(Icon::new(&id, "label", "glyph", TextAction::surround("=")))
            .prefix(Prefix::new(&id, |_| None, |prev, _| prev.to_string()))
            .highlight_rules(rules_from(&[("x", id.as_str())]));
    }
    ext
}

fn expected_ids(extensions: &[ExtensionDescriptor]) -> Vec<String> {
    extensions
        .iter()
        .flat_map(|ext| ext.shortcuts.iter().map(|s| s.id.clone()))
        .collect()
}

// ========================================================================
// Ordering
// ========================================================================

proptest! {
    #[test]
    fn prop_contributions_concatenate_in_extension_order(
        counts in prop::collection::vec(0usize..4, 0..6),
        reverse in any::<bool>(),
    ) {
        let mut extensions: Vec<_> = counts
            .iter()
            .enumerate()
            .map(|(n, count)| extension(n, *count))
            .collect();
        if reverse {
            extensions.reverse();
        }

        let registry = merge(&extensions, &CartaConfig::default());
        let expected = expected_ids(&extensions);
        let contributed = expected.len();

        let shortcuts: Vec<_> = registry.shortcuts.iter().map(|s| s.id.clone()).collect();
        let icons: Vec<_> = registry.icons.iter().map(|i| i.id.clone()).collect();
        let prefixes: Vec<_> = registry.prefixes.iter().map(|p| p.id.clone()).collect();
        let fragments: Vec<_> = registry.highlight_rules.iter().map(|r| r.kind.clone()).collect();

        prop_assert_eq!(&shortcuts[..contributed], &expected[..]);
        prop_assert_eq!(&icons[..contributed], &expected[..]);
        prop_assert_eq!(&prefixes[..contributed], &expected[..]);
        prop_assert_eq!(&fragments, &expected);

        // built-ins always sort last
        let defaults: Vec<String> = DEFAULT_SHORTCUT_IDS.iter().map(|s| s.to_string()).collect();
        prop_assert_eq!(&shortcuts[contributed..], &defaults[..]);
        prop_assert_eq!(icons.len(), contributed + DEFAULT_ICON_IDS.len());
        prop_assert_eq!(prefixes.len(), contributed + DEFAULT_PREFIX_IDS.len());
    }
}

// ========================================================================
// Default exclusion
// ========================================================================

#[test]
fn test_disable_all_shortcuts_leaves_only_extension_shortcuts() {
    let config = CartaConfig {
        disable_shortcuts: Disable::All,
        ..CartaConfig::default()
    };
    let carta = Carta::new(
        isolated_options()
            .with_config(config)
            .extension(extension(0, 2))
            .extension(extension(1, 1)),
    );
    let ids: Vec<_> = carta.shortcuts().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["ext0-0", "ext0-1", "ext1-0"]);
    // other categories keep their defaults
    assert_eq!(carta.icons().len(), 3 + DEFAULT_ICON_IDS.len());
}

#[test]
fn test_disable_by_id_per_category() {
    let config = CartaConfig::from_yaml(
        "disable_icons: [bold, italic]\ndisable_prefixes: [blockquote]\n",
    )
    .unwrap();
    let registry = merge(&[], &config);

    let icons: Vec<_> = registry.icons.iter().map(|i| i.id.as_str()).collect();
    assert!(!icons.contains(&"bold"));
    assert!(!icons.contains(&"italic"));
    assert_eq!(icons.len(), DEFAULT_ICON_IDS.len() - 2);

    let prefixes: Vec<_> = registry.prefixes.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(prefixes, vec!["taskList", "bulletedList", "numberedList"]);
    assert_eq!(registry.shortcuts.len(), DEFAULT_SHORTCUT_IDS.len());
}

#[test]
fn test_unknown_disable_ids_are_ignored() {
    let config = CartaConfig {
        disable_shortcuts: Disable::ids(["does-not-exist"]),
        ..CartaConfig::default()
    };
    assert_eq!(merge(&[], &config).shortcuts.len(), DEFAULT_SHORTCUT_IDS.len());
}

#[test]
fn test_components_concatenate() {
    use carta::extension::{ComponentSlot, ExtensionComponent};

    let first = ExtensionDescriptor::new("a").component(ExtensionComponent::new("toolbar", &[ComponentSlot::Editor]));
    let second = ExtensionDescriptor::new("b").component(ExtensionComponent::new("stats", &[ComponentSlot::Renderer]));
    let registry = merge(&[first, second], &CartaConfig::default());
    let names: Vec<_> = registry.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["toolbar", "stats"]);
}
