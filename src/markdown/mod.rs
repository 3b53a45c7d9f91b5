//! Markdown rendering pipeline
//!
//! Extensions contribute [`MarkupRule`]s; each `Carta` folds them, followed
//! by the enabled built-ins, into one [`AsyncPipeline`] and one
//! [`SyncPipeline`] over `pulldown-cmark`.

mod heading_id;
mod mangle;
mod pipeline;
mod rule;

pub use heading_id::{HeadingIdRule, Slugger};
pub use mangle::{mangle, MangleRule};
pub use pipeline::{base_options, AsyncPipeline, AsyncStage, SyncPipeline, SyncStage};
pub use rule::{AsyncRule, MarkupRule, RenderContext, SyncRule};

use crate::config::CartaConfig;

/// Extension rules in order, then the enabled built-ins
pub fn compose_rules(extension_rules: &[MarkupRule], config: &CartaConfig) -> Vec<MarkupRule> {
    let mut rules = extension_rules.to_vec();
    if config.mangle {
        rules.push(MarkupRule::sync(MangleRule));
    }
    if config.gfm_heading_id.enabled {
        rules.push(MarkupRule::sync(HeadingIdRule::new(
            config.gfm_heading_id.prefix.clone(),
        )));
    }
    rules
}
