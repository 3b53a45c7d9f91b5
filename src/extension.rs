//! Extension descriptors
//!
//! An extension is a plain bundle of contributions. It is handed to
//! `CartaOptions` before construction and never changes afterwards.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::{CartaEvent, Listener, ListenerOptions};
use crate::highlight::{HighlightRule, Highlighter};
use crate::icons::Icon;
use crate::instance::Carta;
use crate::keymap::KeyboardShortcut;
use crate::markdown::MarkupRule;
use crate::prefixes::Prefix;

/// What an `on_load` hook receives
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
    pub carta: &'a Carta,
    pub highlight: &'a Highlighter,
}

pub type OnLoad = Arc<dyn Fn(LoadContext<'_>) + Send + Sync>;

/// UI slot a component is mounted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentSlot {
    Editor,
    Input,
    Renderer,
    Preview,
}

/// A UI add-on; the core only collects these for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionComponent {
    pub name: String,
    #[serde(default)]
    pub props: serde_json::Value,
    pub parents: Vec<ComponentSlot>,
}

impl ExtensionComponent {
    pub fn new(name: &str, parents: &[ComponentSlot]) -> Self {
        Self {
            name: name.to_string(),
            props: serde_json::Value::Null,
            parents: parents.to_vec(),
        }
    }

    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }
}

#[derive(Clone, Default)]
pub struct ExtensionDescriptor {
    /// Used in logs only
    pub name: String,
    pub markup_rules: Vec<MarkupRule>,
    pub shortcuts: Vec<KeyboardShortcut>,
    pub icons: Vec<Icon>,
    pub prefixes: Vec<Prefix>,
    /// Fragments prepended to the composite editor language
    pub highlight_rules: Vec<HighlightRule>,
    pub listeners: Vec<Listener>,
    pub components: Vec<ExtensionComponent>,
    pub on_load: Option<OnLoad>,
}

impl ExtensionDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn markup_rule(mut self, rule: MarkupRule) -> Self {
        self.markup_rules.push(rule);
        self
    }

    pub fn shortcut(mut self, shortcut: KeyboardShortcut) -> Self {
        self.shortcuts.push(shortcut);
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icons.push(icon);
        self
    }

    pub fn prefix(mut self, prefix: Prefix) -> Self {
        self.prefixes.push(prefix);
        self
    }

    pub fn highlight_rules(mut self, rules: impl IntoIterator<Item = HighlightRule>) -> Self {
        self.highlight_rules.extend(rules);
        self
    }

    pub fn listener(mut self, listener: Listener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Shorthand for a listener with default options
    pub fn on<F>(self, event: &str, handler: F) -> Self
    where
        F: Fn(&CartaEvent<'_>) + Send + Sync + 'static,
    {
        self.listener(Listener::new(event, handler).with_options(ListenerOptions::default()))
    }

    pub fn component(mut self, component: ExtensionComponent) -> Self {
        self.components.push(component);
        self
    }

    pub fn on_load<F>(mut self, hook: F) -> Self
    where
        F: Fn(LoadContext<'_>) + Send + Sync + 'static,
    {
        self.on_load = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for ExtensionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionDescriptor")
            .field("name", &self.name)
            .field("markup_rules", &self.markup_rules)
            .field("shortcuts", &self.shortcuts.len())
            .field("icons", &self.icons.len())
            .field("prefixes", &self.prefixes.len())
            .field("highlight_rules", &self.highlight_rules.len())
            .field("listeners", &self.listeners)
            .field("components", &self.components)
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}
