//! Command-line argument parsing for the `carta` renderer
//!
//! Supports:
//! - Rendering a markdown file with the async (highlighting) pipeline
//! - `--ssr` for the synchronous pipeline
//! - An explicit config file instead of `~/.config/carta/config.yaml`

use clap::Parser;
use std::path::PathBuf;

use crate::config::CartaConfig;
use crate::error::CartaError;
use crate::instance::CartaOptions;
use crate::plugins::{self, CodeOptions};

/// Render markdown to HTML
#[derive(Parser, Debug)]
#[command(name = "carta", version, about = "Render markdown to HTML")]
pub struct CliArgs {
    /// Markdown file to render
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Use the synchronous pipeline (no code highlighting)
    #[arg(long)]
    pub ssr: bool,

    /// Config file to use instead of the user config
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Add a line-number gutter to highlighted code
    #[arg(long)]
    pub line_numbers: bool,

    /// Leave code blocks unhighlighted
    #[arg(long)]
    pub no_highlight: bool,
}

/// Which pipeline renders the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Async,
    Ssr,
}

/// Everything `main` needs to render
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub input: PathBuf,
    pub mode: RenderMode,
    pub options: CartaOptions,
}

impl CliArgs {
    /// Resolve the config and extensions for this invocation
    pub fn into_job(self) -> Result<RenderJob, CartaError> {
        let config = match &self.config {
            Some(path) => CartaConfig::load_from(path)?,
            None => CartaConfig::load(),
        };

        let mut options = CartaOptions::new().with_config(config).extension(plugins::math());
        if !self.no_highlight {
            options = options.extension(plugins::code(CodeOptions {
                line_numbering: self.line_numbers,
                ..CodeOptions::default()
            }));
        }

        let mode = if self.ssr {
            RenderMode::Ssr
        } else {
            RenderMode::Async
        };

        Ok(RenderJob {
            input: self.file,
            mode,
            options,
        })
    }
}
