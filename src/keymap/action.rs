//! Text actions triggered by shortcuts and toolbar icons
//!
//! The core never executes these itself: caret and selection handling belong
//! to the input surface, which receives them through its binding.

use std::fmt;
use std::sync::Arc;

use crate::surface::InputSurface;

/// Callback for extension-defined actions
pub type CustomAction = Arc<dyn Fn(&dyn InputSurface) + Send + Sync>;

/// An editing action the input surface knows how to perform
#[derive(Clone)]
pub enum TextAction {
    /// Wrap (or unwrap) the selection with the same delimiter on both sides
    ToggleSurrounding(String),
    /// Wrap (or unwrap) the selection with distinct opening/closing text
    ToggleSurroundingPair { open: String, close: String },
    /// Add (or remove) a prefix on every selected line
    ToggleLinePrefix(String),
    Undo,
    Redo,
    /// Action supplied by an extension
    Custom(CustomAction),
}

impl TextAction {
    pub fn surround(delimiter: &str) -> Self {
        TextAction::ToggleSurrounding(delimiter.to_string())
    }

    pub fn surround_pair(open: &str, close: &str) -> Self {
        TextAction::ToggleSurroundingPair {
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    pub fn line_prefix(prefix: &str) -> Self {
        TextAction::ToggleLinePrefix(prefix.to_string())
    }

    pub fn custom(action: impl Fn(&dyn InputSurface) + Send + Sync + 'static) -> Self {
        TextAction::Custom(Arc::new(action))
    }
}

impl fmt::Debug for TextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextAction::ToggleSurrounding(d) => f.debug_tuple("ToggleSurrounding").field(d).finish(),
            TextAction::ToggleSurroundingPair { open, close } => f
                .debug_struct("ToggleSurroundingPair")
                .field("open", open)
                .field("close", close)
                .finish(),
            TextAction::ToggleLinePrefix(p) => f.debug_tuple("ToggleLinePrefix").field(p).finish(),
            TextAction::Undo => write!(f, "Undo"),
            TextAction::Redo => write!(f, "Redo"),
            TextAction::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for TextAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextAction::ToggleSurrounding(a), TextAction::ToggleSurrounding(b)) => a == b,
            (
                TextAction::ToggleSurroundingPair { open: o1, close: c1 },
                TextAction::ToggleSurroundingPair { open: o2, close: c2 },
            ) => o1 == o2 && c1 == c2,
            (TextAction::ToggleLinePrefix(a), TextAction::ToggleLinePrefix(b)) => a == b,
            (TextAction::Undo, TextAction::Undo) | (TextAction::Redo, TextAction::Redo) => true,
            (TextAction::Custom(a), TextAction::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
