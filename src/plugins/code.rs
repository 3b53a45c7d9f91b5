//! Fenced code block highlighting

use async_trait::async_trait;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::extension::ExtensionDescriptor;
use crate::highlight::{Highlighter, PLAIN_LANGUAGE};
use crate::markdown::{AsyncRule, MarkupRule, RenderContext};

/// Class prefix of the `<code>` element, followed by the declared language
pub const LANG_CLASS_PREFIX: &str = "shj-lang-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeOptions {
    /// Used when a block declares no language
    pub default_language: Option<String>,
    /// Guess the language when neither the block nor the default resolves
    pub auto_detect: bool,
    pub line_numbering: bool,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            default_language: None,
            auto_detect: true,
            line_numbering: false,
        }
    }
}

/// Extension highlighting fenced and indented code blocks in `render`
///
/// The rule is async, so `render_ssr` leaves code blocks to the default
/// renderer. Blocks are highlighted with the rendering instance's
/// highlighter, so one descriptor can be shared between instances.
pub fn code(options: CodeOptions) -> ExtensionDescriptor {
    ExtensionDescriptor::new("code").markup_rule(MarkupRule::asynchronous(CodeRule { options }))
}

struct CodeRule {
    options: CodeOptions,
}

impl CodeRule {
    async fn highlight_block(&self, highlighter: &Highlighter, code: &str, declared: &str) -> String {
        let hide_line_numbers = !self.options.line_numbering;

        let language = if declared.is_empty() {
            self.options.default_language.as_deref().unwrap_or("")
        } else {
            declared
        };

        if !language.is_empty() {
            if let Some(html) = highlighter.highlight(code, language, hide_line_numbers).await {
                return html;
            }
            tracing::trace!("No highlighter for language '{}'", language);
        }

        if self.options.auto_detect {
            return highlighter.highlight_autodetect(code, hide_line_numbers).await;
        }

        highlighter
            .highlight(code, PLAIN_LANGUAGE, hide_line_numbers)
            .await
            .unwrap_or_else(|| crate::highlight::plain(code, hide_line_numbers))
    }
}

fn block_language(kind: &CodeBlockKind<'_>) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or("").to_string(),
        CodeBlockKind::Indented => String::new(),
    }
}

fn open_tag(language: &str) -> String {
    if language.is_empty() {
        return "<pre><code>".to_string();
    }
    let mut tag = String::from("<pre><code class=\"");
    tag.push_str(LANG_CLASS_PREFIX);
    for c in language.chars() {
        match c {
            '&' => tag.push_str("&amp;"),
            '"' => tag.push_str("&quot;"),
            '<' => tag.push_str("&lt;"),
            '>' => tag.push_str("&gt;"),
            _ => tag.push(c),
        }
    }
    tag.push_str("\">");
    tag
}

#[async_trait]
impl AsyncRule for CodeRule {
    fn name(&self) -> &str {
        "code"
    }

    async fn transform<'a>(
        &self,
        events: Vec<Event<'a>>,
        ctx: RenderContext<'_>,
    ) -> Result<Vec<Event<'a>>, BoxError> {
        let mut out = Vec::with_capacity(events.len());
        let mut block: Option<(String, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    block = Some((block_language(&kind), String::new()));
                }
                Event::Text(text) if block.is_some() => {
                    if let Some((_, code)) = block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, code)) = block.take() {
                        let code = code.strip_suffix('\n').unwrap_or(&code);
                        let body = self.highlight_block(ctx.highlighter, code, &language).await;
                        let html = format!("{}{}</code></pre>\n", open_tag(&language), body);
                        out.push(Event::Html(CowStr::from(html)));
                    }
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }
}
