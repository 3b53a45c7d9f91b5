//! Markup-transform rules contributed by extensions

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use pulldown_cmark::{Event, Options};

use crate::error::BoxError;
use crate::highlight::Highlighter;

/// A rule that runs to completion without suspending
///
/// Every hook defaults to identity, so a rule only implements the stages it
/// cares about. Hooks run in registration order: `preprocess` on the source,
/// `transform` on the parsed event stream, `postprocess` on the HTML.
pub trait SyncRule: Send + Sync {
    fn name(&self) -> &str;

    /// Parser extensions this rule needs
    fn options(&self) -> Options {
        Options::empty()
    }

    fn preprocess(&self, source: String) -> Result<String, BoxError> {
        Ok(source)
    }

    fn transform<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, BoxError> {
        Ok(events)
    }

    fn postprocess(&self, html: String) -> Result<String, BoxError> {
        Ok(html)
    }
}

/// The rendering instance, as seen by an async rule
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'c> {
    /// Highlighter over the instance's own language registry
    pub highlighter: &'c Highlighter,
}

impl<'c> RenderContext<'c> {
    pub fn new(highlighter: &'c Highlighter) -> Self {
        Self { highlighter }
    }
}

/// A rule whose event transform may suspend (e.g. to load a syntax)
///
/// Async rules only run in `Carta::render`; `render_ssr` passes their input
/// through untouched. A rule may be shared by several instances, so anything
/// instance-specific comes in through the [`RenderContext`].
#[async_trait]
pub trait AsyncRule: Send + Sync {
    fn name(&self) -> &str;

    fn options(&self) -> Options {
        Options::empty()
    }

    async fn transform<'a>(
        &self,
        events: Vec<Event<'a>>,
        ctx: RenderContext<'_>,
    ) -> Result<Vec<Event<'a>>, BoxError>;
}

/// One markup-transform rule of an extension
#[derive(Clone)]
pub enum MarkupRule {
    Sync(Arc<dyn SyncRule>),
    Async(Arc<dyn AsyncRule>),
}

impl MarkupRule {
    pub fn sync(rule: impl SyncRule + 'static) -> Self {
        MarkupRule::Sync(Arc::new(rule))
    }

    pub fn asynchronous(rule: impl AsyncRule + 'static) -> Self {
        MarkupRule::Async(Arc::new(rule))
    }

    /// Rule that rewrites the markdown source before parsing
    pub fn preprocess<F>(name: &str, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        Self::sync(FnRule {
            name: name.to_string(),
            options: Options::empty(),
            pre: Some(Box::new(f)),
            post: None,
        })
    }

    /// Rule that rewrites the generated HTML
    pub fn postprocess<F>(name: &str, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        Self::sync(FnRule {
            name: name.to_string(),
            options: Options::empty(),
            pre: None,
            post: Some(Box::new(f)),
        })
    }

    /// Rule that only switches on parser extensions
    pub fn options(name: &str, options: Options) -> Self {
        Self::sync(FnRule {
            name: name.to_string(),
            options,
            pre: None,
            post: None,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            MarkupRule::Sync(rule) => rule.name(),
            MarkupRule::Async(rule) => rule.name(),
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, MarkupRule::Async(_))
    }
}

impl fmt::Debug for MarkupRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupRule::Sync(rule) => f.debug_tuple("Sync").field(&rule.name()).finish(),
            MarkupRule::Async(rule) => f.debug_tuple("Async").field(&rule.name()).finish(),
        }
    }
}

type TextHook = Box<dyn Fn(String) -> String + Send + Sync>;

struct FnRule {
    name: String,
    options: Options,
    pre: Option<TextHook>,
    post: Option<TextHook>,
}

impl SyncRule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn options(&self) -> Options {
        self.options
    }

    fn preprocess(&self, source: String) -> Result<String, BoxError> {
        Ok(match &self.pre {
            Some(pre) => pre(source),
            None => source,
        })
    }

    fn postprocess(&self, html: String) -> Result<String, BoxError> {
        Ok(match &self.post {
            Some(post) => post(html),
            None => html,
        })
    }
}
