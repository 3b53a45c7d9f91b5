//! Carta - extension composition and dual-mode markdown rendering
//!
//! A [`Carta`] instance merges independently authored extensions (markup
//! rules, shortcuts, icons, prefixes, highlight fragments, listeners, UI
//! components) with the built-in defaults, and renders markdown to sanitized
//! HTML in two modes:
//!
//! - [`Carta::render`] runs every rule, including async ones such as code
//!   highlighting
//! - [`Carta::render_ssr`] never suspends; async rules pass through

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod events;
pub mod extension;
pub mod highlight;
pub mod icons;
pub mod instance;
pub mod keymap;
pub mod markdown;
pub mod plugins;
pub mod prefixes;
pub mod registry;
pub mod surface;
pub mod tracing;

// Re-export commonly used types
pub use config::{CartaConfig, Disable};
pub use error::{BoxError, CartaError};
pub use events::{ListenerOptions, RENDER_EVENT, RENDER_SSR_EVENT};
pub use extension::ExtensionDescriptor;
pub use highlight::{Highlighter, LanguageRegistry};
pub use instance::{Carta, CartaOptions, Sanitizer};
pub use markdown::MarkupRule;
pub use surface::{InputSurface, RendererSurface};
