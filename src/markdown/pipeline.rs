//! The two configured parser instances
//!
//! Both pipelines fold the same ordered rule list onto the same base
//! grammar. The sync pipeline stores async rules as pass-through stages, so
//! its stage type cannot hold anything that suspends.

use std::sync::Arc;
use std::time::Instant;

use pulldown_cmark::{html, Event, Options, Parser};

use super::rule::{AsyncRule, MarkupRule, RenderContext, SyncRule};
use crate::error::CartaError;

/// Grammar every instance starts from
pub fn base_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

fn rule_error(rule: &str, source: crate::error::BoxError) -> CartaError {
    CartaError::Rule {
        rule: rule.to_string(),
        source,
    }
}

#[derive(Clone)]
pub enum SyncStage {
    Rule(Arc<dyn SyncRule>),
    /// Stands in for an async rule; its input is passed through
    PassThrough(String),
}

impl SyncStage {
    pub fn name(&self) -> &str {
        match self {
            SyncStage::Rule(rule) => rule.name(),
            SyncStage::PassThrough(name) => name,
        }
    }
}

#[derive(Clone)]
pub enum AsyncStage {
    Sync(Arc<dyn SyncRule>),
    Async(Arc<dyn AsyncRule>),
}

impl AsyncStage {
    pub fn name(&self) -> &str {
        match self {
            AsyncStage::Sync(rule) => rule.name(),
            AsyncStage::Async(rule) => rule.name(),
        }
    }
}

/// Parser instance used by `render_ssr`
#[derive(Clone)]
pub struct SyncPipeline {
    options: Options,
    stages: Vec<SyncStage>,
}

impl SyncPipeline {
    pub fn new(rules: &[MarkupRule]) -> Self {
        let mut options = base_options();
        let stages = rules
            .iter()
            .map(|rule| match rule {
                MarkupRule::Sync(rule) => {
                    options |= rule.options();
                    SyncStage::Rule(Arc::clone(rule))
                }
                MarkupRule::Async(rule) => SyncStage::PassThrough(rule.name().to_string()),
            })
            .collect();
        Self { options, stages }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(SyncStage::name).collect()
    }

    pub fn stages(&self) -> &[SyncStage] {
        &self.stages
    }

    fn rules(&self) -> impl Iterator<Item = &Arc<dyn SyncRule>> {
        self.stages.iter().filter_map(|stage| match stage {
            SyncStage::Rule(rule) => Some(rule),
            SyncStage::PassThrough(_) => None,
        })
    }

    pub fn parse(&self, markdown: &str) -> Result<String, CartaError> {
        let start = Instant::now();

        let mut source = markdown.to_string();
        for rule in self.rules() {
            source = rule.preprocess(source).map_err(|e| rule_error(rule.name(), e))?;
        }

        let mut events: Vec<Event<'_>> = Parser::new_ext(&source, self.options).collect();
        for rule in self.rules() {
            events = rule.transform(events).map_err(|e| rule_error(rule.name(), e))?;
        }

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());

        for rule in self.rules() {
            output = rule.postprocess(output).map_err(|e| rule_error(rule.name(), e))?;
        }

        tracing::trace!("Sync parse of {} bytes took {:?}", markdown.len(), start.elapsed());
        Ok(output)
    }
}

/// Parser instance used by `render`
#[derive(Clone)]
pub struct AsyncPipeline {
    options: Options,
    stages: Vec<AsyncStage>,
}

impl AsyncPipeline {
    pub fn new(rules: &[MarkupRule]) -> Self {
        let mut options = base_options();
        let stages = rules
            .iter()
            .map(|rule| match rule {
                MarkupRule::Sync(rule) => {
                    options |= rule.options();
                    AsyncStage::Sync(Arc::clone(rule))
                }
                MarkupRule::Async(rule) => {
                    options |= rule.options();
                    AsyncStage::Async(Arc::clone(rule))
                }
            })
            .collect();
        Self { options, stages }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(AsyncStage::name).collect()
    }

    pub fn stages(&self) -> &[AsyncStage] {
        &self.stages
    }

    pub async fn parse(&self, markdown: &str, ctx: RenderContext<'_>) -> Result<String, CartaError> {
        let start = Instant::now();

        let mut source = markdown.to_string();
        for stage in &self.stages {
            if let AsyncStage::Sync(rule) = stage {
                source = rule.preprocess(source).map_err(|e| rule_error(rule.name(), e))?;
            }
        }

        let mut events: Vec<Event<'_>> = Parser::new_ext(&source, self.options).collect();
        for stage in &self.stages {
            events = match stage {
                AsyncStage::Sync(rule) => rule.transform(events),
                AsyncStage::Async(rule) => rule.transform(events, ctx).await,
            }
            .map_err(|e| rule_error(stage.name(), e))?;
        }

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());

        for stage in &self.stages {
            if let AsyncStage::Sync(rule) = stage {
                output = rule.postprocess(output).map_err(|e| rule_error(rule.name(), e))?;
            }
        }

        tracing::trace!("Async parse of {} bytes took {:?}", markdown.len(), start.elapsed());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::highlight::{Highlighter, LanguageRegistry};
    use async_trait::async_trait;
    use pulldown_cmark::CowStr;

    struct Shout;

    #[async_trait]
    impl AsyncRule for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        async fn transform<'a>(
            &self,
            events: Vec<Event<'a>>,
            _ctx: RenderContext<'_>,
        ) -> Result<Vec<Event<'a>>, BoxError> {
            Ok(events
                .into_iter()
                .map(|event| match event {
                    Event::Text(text) => Event::Text(CowStr::from(text.to_uppercase())),
                    other => other,
                })
                .collect())
        }
    }

    struct Broken;

    impl SyncRule for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn transform<'a>(&self, _events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, BoxError> {
            Err("no".into())
        }
    }

    fn rules() -> Vec<MarkupRule> {
        vec![
            MarkupRule::preprocess("swap", |s| s.replace("cat", "dog")),
            MarkupRule::asynchronous(Shout),
            MarkupRule::postprocess("wrap", |s| format!("<main>{}</main>", s)),
        ]
    }

    #[test]
    fn test_sync_pipeline_keeps_order_with_pass_through() {
        let pipeline = SyncPipeline::new(&rules());
        assert_eq!(pipeline.stage_names(), vec!["swap", "shout", "wrap"]);
        assert!(matches!(pipeline.stages()[1], SyncStage::PassThrough(_)));
        assert_eq!(pipeline.parse("a cat").unwrap(), "<main><p>a dog</p>\n</main>");
    }

    #[tokio::test]
    async fn test_async_pipeline_runs_async_rules() {
        let pipeline = AsyncPipeline::new(&rules());
        let highlighter = Highlighter::new(Arc::new(LanguageRegistry::new()));
        assert_eq!(pipeline.stage_names(), vec!["swap", "shout", "wrap"]);
        assert_eq!(
            pipeline
                .parse("a cat", RenderContext::new(&highlighter))
                .await
                .unwrap(),
            "<main><p>A DOG</p>\n</main>"
        );
    }

    #[test]
    fn test_rule_options_are_merged() {
        let pipeline = SyncPipeline::new(&[MarkupRule::options("math", Options::ENABLE_MATH)]);
        assert!(pipeline.options().contains(Options::ENABLE_MATH));
        assert!(pipeline.options().contains(Options::ENABLE_TABLES));
    }

    #[test]
    fn test_rule_error_names_the_rule() {
        let pipeline = SyncPipeline::new(&[MarkupRule::sync(Broken)]);
        match pipeline.parse("x") {
            Err(CartaError::Rule { rule, .. }) => assert_eq!(rule, "broken"),
            other => panic!("expected rule error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_source_renders_empty() {
        assert_eq!(SyncPipeline::new(&[]).parse("").unwrap(), "");
    }
}
