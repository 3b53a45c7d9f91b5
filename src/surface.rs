//! Attachment points for the external input and renderer surfaces
//!
//! Caret handling, undo history and on-screen presentation live outside this
//! crate. A surface only has to accept an `update()` invocation; the input
//! surface additionally receives the composed shortcut/prefix/listener tables
//! when it is attached.

use std::time::Duration;

use crate::config::HistoryOptions;
use crate::events::Listener;
use crate::keymap::KeyboardShortcut;
use crate::prefixes::Prefix;

/// Everything an input surface needs from the composed configuration
#[derive(Debug, Clone, Copy)]
pub struct InputBinding<'a> {
    pub shortcuts: &'a [KeyboardShortcut],
    pub prefixes: &'a [Prefix],
    /// Listeners for non-reserved events, to be installed on the surface
    pub listeners: &'a [Listener],
    pub history: &'a HistoryOptions,
    pub renderer_debounce: Duration,
}

/// The text-input collaborator
pub trait InputSurface: Send + Sync {
    /// Called once when the surface is attached to an instance
    fn bind(&self, binding: InputBinding<'_>);

    /// Content-changed signal; the surface should re-render
    fn update(&self);
}

/// The rendered-output collaborator
pub trait RendererSurface: Send + Sync {
    /// Content-changed signal
    fn update(&self) {}
}
