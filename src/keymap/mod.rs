//! Keyboard shortcuts handed to the input surface
//!
//! This module provides a data-driven shortcut table that:
//! - Maps key combinations to text actions
//! - Supports platform-specific modifier handling (Cmd on macOS, Ctrl elsewhere)
//! - Parses combination strings such as `"ctrl+shift+x"`
//!
//! # Architecture
//!
//! ```text
//! defaults + extension shortcuts → registry::merge → InputBinding → input surface
//! ```

mod action;
mod defaults;
mod shortcut;
mod types;

pub use action::{CustomAction, TextAction};
pub use defaults::{default_shortcuts, DEFAULT_SHORTCUT_IDS};
pub use shortcut::KeyboardShortcut;
pub use types::{KeyCode, Keystroke, Modifiers};
