//! Composition of extension contributions and built-in defaults

use crate::config::{CartaConfig, Disable};
use crate::events::Listener;
use crate::extension::{ExtensionComponent, ExtensionDescriptor};
use crate::highlight::HighlightRule;
use crate::icons::{default_icons, Icon};
use crate::keymap::{default_shortcuts, KeyboardShortcut};
use crate::markdown::MarkupRule;
use crate::prefixes::{default_prefixes, Prefix};

/// Everything the extensions and defaults contributed, in resolution order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub markup_rules: Vec<MarkupRule>,
    pub shortcuts: Vec<KeyboardShortcut>,
    pub icons: Vec<Icon>,
    pub prefixes: Vec<Prefix>,
    pub highlight_rules: Vec<HighlightRule>,
    pub components: Vec<ExtensionComponent>,
    /// Listeners for reserved event names
    pub system_listeners: Vec<Listener>,
    /// Listeners handed to the input surface
    pub surface_listeners: Vec<Listener>,
}

/// Append the built-ins of one category that survive `disable`
fn append_defaults<T>(into: &mut Vec<T>, defaults: Vec<T>, disable: &Disable, id: impl Fn(&T) -> &str) {
    into.extend(defaults.into_iter().filter(|item| disable.allows(id(item))));
}

/// Merge `extensions` in order, then the filtered built-in defaults
///
/// Extension contributions come first so they win on lookups that take the
/// first match; the defaults act as a fallback.
pub fn merge(extensions: &[ExtensionDescriptor], config: &CartaConfig) -> Registry {
    let mut registry = Registry::default();
    let mut listeners = Vec::new();

    for ext in extensions {
        registry.markup_rules.extend(ext.markup_rules.iter().cloned());
        registry.shortcuts.extend(ext.shortcuts.iter().cloned());
        registry.icons.extend(ext.icons.iter().cloned());
        registry.prefixes.extend(ext.prefixes.iter().cloned());
        registry.highlight_rules.extend(ext.highlight_rules.iter().cloned());
        registry.components.extend(ext.components.iter().cloned());
        listeners.extend(ext.listeners.iter().cloned());
    }

    append_defaults(
        &mut registry.shortcuts,
        default_shortcuts(),
        &config.disable_shortcuts,
        |s| s.id.as_str(),
    );
    append_defaults(&mut registry.icons, default_icons(), &config.disable_icons, |i| i.id.as_str());
    append_defaults(
        &mut registry.prefixes,
        default_prefixes(),
        &config.disable_prefixes,
        |p| p.id.as_str(),
    );

    let (system, surface): (Vec<_>, Vec<_>) = listeners.into_iter().partition(Listener::is_system);
    registry.system_listeners = system;
    registry.surface_listeners = surface;

    tracing::debug!(
        extensions = extensions.len(),
        rules = registry.markup_rules.len(),
        shortcuts = registry.shortcuts.len(),
        icons = registry.icons.len(),
        prefixes = registry.prefixes.len(),
        fragments = registry.highlight_rules.len(),
        system_listeners = registry.system_listeners.len(),
        surface_listeners = registry.surface_listeners.len(),
        "Merged extension registry"
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RENDER_EVENT;
    use crate::keymap::{TextAction, DEFAULT_SHORTCUT_IDS};

    fn ext_with_shortcut(id: &str) -> ExtensionDescriptor {
        ExtensionDescriptor::new(id).shortcut(
            KeyboardShortcut::parse(id, "ctrl+alt+h", TextAction::surround("==")).unwrap(),
        )
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|item| id(item).to_string()).collect()
    }

    #[test]
    fn test_extensions_before_defaults() {
        let registry = merge(&[ext_with_shortcut("a"), ext_with_shortcut("b")], &CartaConfig::default());
        let shortcut_ids = ids(&registry.shortcuts, |s| s.id.as_str());
        assert_eq!(&shortcut_ids[..2], &["a".to_string(), "b".to_string()]);
        assert_eq!(shortcut_ids.len(), 2 + DEFAULT_SHORTCUT_IDS.len());
    }

    #[test]
    fn test_disable_by_id() {
        let config = CartaConfig {
            disable_shortcuts: Disable::ids(["bold"]),
            ..CartaConfig::default()
        };
        let registry = merge(&[], &config);
        let shortcut_ids = ids(&registry.shortcuts, |s| s.id.as_str());
        assert!(!shortcut_ids.contains(&"bold".to_string()));
        assert!(shortcut_ids.contains(&"italic".to_string()));
    }

    #[test]
    fn test_disable_all_keeps_extension_items() {
        let config = CartaConfig {
            disable_shortcuts: Disable::All,
            disable_icons: Disable::All,
            disable_prefixes: Disable::All,
            ..CartaConfig::default()
        };
        let registry = merge(&[ext_with_shortcut("mine")], &config);
        assert_eq!(ids(&registry.shortcuts, |s| s.id.as_str()), vec!["mine"]);
        assert!(registry.icons.is_empty());
        assert!(registry.prefixes.is_empty());
    }

    #[test]
    fn test_listeners_are_partitioned() {
        let ext = ExtensionDescriptor::new("x")
            .on(RENDER_EVENT, |_| {})
            .on("keyup", |_| {})
            .on("carta-render-ssr", |_| {});
        let registry = merge(&[ext], &CartaConfig::default());
        assert_eq!(
            ids(&registry.system_listeners, |l| l.event.as_str()),
            vec![RENDER_EVENT, "carta-render-ssr"]
        );
        assert_eq!(ids(&registry.surface_listeners, |l| l.event.as_str()), vec!["keyup"]);
    }
}
