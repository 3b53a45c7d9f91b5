//! Default keyboard shortcuts
//!
//! These ship with every instance and are appended after extension shortcuts,
//! so an extension binding the same combination wins the match.

use super::action::TextAction;
use super::shortcut::KeyboardShortcut;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Identifiers of the default shortcuts, usable in `disable_shortcuts`
pub const DEFAULT_SHORTCUT_IDS: &[&str] = &[
    "bold",
    "italic",
    "quote",
    "link",
    "strikethrough",
    "code",
    "undo",
    "redo",
];

/// Generate default shortcuts for the current platform
///
/// Uses Cmd on macOS, Ctrl on Windows/Linux for the "command" modifier.
pub fn default_shortcuts() -> Vec<KeyboardShortcut> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;

    vec![
        bind("bold", KeyCode::Char('b'), cmd, TextAction::surround("**")),
        bind("italic", KeyCode::Char('i'), cmd, TextAction::surround("*")),
        bind("quote", KeyCode::Char(','), cmd_shift, TextAction::line_prefix("> ")),
        bind("link", KeyCode::Char('k'), cmd, TextAction::surround_pair("[", "](url)")),
        bind("strikethrough", KeyCode::Char('x'), cmd_shift, TextAction::surround("~~")),
        bind("code", KeyCode::Char('e'), cmd, TextAction::surround("`")),
        bind("undo", KeyCode::Char('z'), cmd, TextAction::Undo),
        bind("redo", KeyCode::Char('y'), cmd, TextAction::Redo),
    ]
}

fn bind(id: &str, key: KeyCode, mods: Modifiers, action: TextAction) -> KeyboardShortcut {
    KeyboardShortcut::new(id, Keystroke::new(key, mods), action)
}
