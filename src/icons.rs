//! Toolbar icons offered by the editor surface

use crate::keymap::TextAction;

/// A toolbar icon contributed by the defaults or an extension
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    /// Identifier used by `disable_icons`
    pub id: String,
    /// Tooltip text
    pub label: String,
    /// Name of the glyph the surface should draw
    pub glyph: String,
    pub action: TextAction,
}

impl Icon {
    pub fn new(id: &str, label: &str, glyph: &str, action: TextAction) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            glyph: glyph.to_string(),
            action,
        }
    }
}

/// Identifiers of the default icons, usable in `disable_icons`
pub const DEFAULT_ICON_IDS: &[&str] = &[
    "heading",
    "bold",
    "italic",
    "strikethrough",
    "quote",
    "code",
    "link",
    "bulletedList",
    "numberedList",
    "taskList",
];

pub fn default_icons() -> Vec<Icon> {
    vec![
        Icon::new("heading", "Heading", "heading", TextAction::line_prefix("### ")),
        Icon::new("bold", "Bold", "bold", TextAction::surround("**")),
        Icon::new("italic", "Italic", "italic", TextAction::surround("*")),
        Icon::new("strikethrough", "Strikethrough", "strikethrough", TextAction::surround("~~")),
        Icon::new("quote", "Quote", "quote", TextAction::line_prefix("> ")),
        Icon::new("code", "Code", "code", TextAction::surround("`")),
        Icon::new("link", "Link", "link", TextAction::surround_pair("[", "](url)")),
        Icon::new("bulletedList", "Bulleted list", "list-bulleted", TextAction::line_prefix("- ")),
        Icon::new("numberedList", "Numbered list", "list-numbered", TextAction::line_prefix("1. ")),
        Icon::new("taskList", "Task list", "list-task", TextAction::line_prefix("- [ ] ")),
    ]
}
