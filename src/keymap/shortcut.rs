//! Keyboard shortcut mapping a key combination to a text action

use super::action::TextAction;
use super::types::Keystroke;
use crate::error::CartaError;

/// A keyboard shortcut contributed by the defaults or an extension
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardShortcut {
    /// Identifier used by `disable_shortcuts`
    pub id: String,
    pub keystroke: Keystroke,
    pub action: TextAction,
    /// Whether the surface should swallow the native key event
    pub prevent_default: bool,
}

impl KeyboardShortcut {
    pub fn new(id: &str, keystroke: Keystroke, action: TextAction) -> Self {
        Self {
            id: id.to_string(),
            keystroke,
            action,
            prevent_default: true,
        }
    }

    /// Build a shortcut from a combination string like "ctrl+shift+x"
    pub fn parse(id: &str, combination: &str, action: TextAction) -> Result<Self, CartaError> {
        Ok(Self::new(id, combination.parse()?, action))
    }

    /// Let the native key event through as well
    pub fn allow_default(mut self) -> Self {
        self.prevent_default = false;
        self
    }

    pub fn matches(&self, keystroke: &Keystroke) -> bool {
        self.keystroke == *keystroke
    }
}
