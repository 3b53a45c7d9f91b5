//! Renderer configuration
//!
//! The serializable part of the construction options. Can be read from
//! `~/.config/carta/config.yaml` or any YAML file; extensions and the
//! sanitizer are added in code through [`crate::CartaOptions`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CartaError;

/// Which built-in items of a category to drop
///
/// In YAML, `true` disables every built-in and a list disables by id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DisableRepr", into = "DisableRepr")]
pub enum Disable {
    #[default]
    None,
    All,
    Ids(Vec<String>),
}

impl Disable {
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Disable::Ids(ids.into_iter().map(Into::into).collect())
    }

    /// Whether the built-in with this id survives the filter
    pub fn allows(&self, id: &str) -> bool {
        match self {
            Disable::None => true,
            Disable::All => false,
            Disable::Ids(ids) => !ids.iter().any(|disabled| disabled == id),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DisableRepr {
    Flag(bool),
    Ids(Vec<String>),
}

impl From<DisableRepr> for Disable {
    fn from(repr: DisableRepr) -> Self {
        match repr {
            DisableRepr::Flag(true) => Disable::All,
            DisableRepr::Flag(false) => Disable::None,
            DisableRepr::Ids(ids) => Disable::Ids(ids),
        }
    }
}

impl From<Disable> for DisableRepr {
    fn from(disable: Disable) -> Self {
        match disable {
            Disable::None => DisableRepr::Flag(false),
            Disable::All => DisableRepr::Flag(true),
            Disable::Ids(ids) => DisableRepr::Ids(ids),
        }
    }
}

/// Undo/redo options, forwarded untouched to the input surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOptions {
    /// Minimum interval between two history snapshots
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Maximum history size in bytes
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

fn default_min_interval_ms() -> u64 {
    300
}

fn default_max_size() -> usize {
    1_000_000
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            max_size: default_max_size(),
        }
    }
}

/// Heading identifier injection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingIdOptions {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Prepended to every generated id
    #[serde(default)]
    pub prefix: String,
}

impl Default for HeadingIdOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: String::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    300
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartaConfig {
    /// Renderer debouncing timeout, consumed by the input surface only
    #[serde(default = "default_debounce_ms")]
    pub renderer_debounce_ms: u64,
    #[serde(default)]
    pub disable_shortcuts: Disable,
    #[serde(default)]
    pub disable_icons: Disable,
    #[serde(default)]
    pub disable_prefixes: Disable,
    #[serde(default)]
    pub history: HistoryOptions,
    /// Obfuscate email autolinks
    #[serde(default = "default_true")]
    pub mangle: bool,
    #[serde(default)]
    pub gfm_heading_id: HeadingIdOptions,
}

impl Default for CartaConfig {
    fn default() -> Self {
        Self {
            renderer_debounce_ms: default_debounce_ms(),
            disable_shortcuts: Disable::None,
            disable_icons: Disable::None,
            disable_prefixes: Disable::None,
            history: HistoryOptions::default(),
            mangle: true,
            gfm_heading_id: HeadingIdOptions::default(),
        }
    }
}

impl CartaConfig {
    /// Load config from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, CartaError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CartaError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CartaError> {
        serde_yaml::from_str(yaml).map_err(|e| CartaError::Config(e.to_string()))
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), CartaError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CartaError::Io(format!("Failed to create config directory: {}", e)))?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| CartaError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CartaError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn renderer_debounce(&self) -> Duration {
        Duration::from_millis(self.renderer_debounce_ms)
    }
}
