//! Email autolink obfuscation

use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

use super::rule::SyncRule;
use crate::error::BoxError;

/// Write every character as a numeric character reference
///
/// Even positions are decimal, odd positions hexadecimal.
pub fn mangle(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 6);
    for (idx, c) in text.chars().enumerate() {
        if idx % 2 == 0 {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push_str(&format!("&#x{:x};", c as u32));
        }
    }
    out
}

/// Renders `<user@host>` autolinks with mangled href and text
#[derive(Debug, Default)]
pub struct MangleRule;

impl MangleRule {
    pub const NAME: &'static str = "mangle";
}

impl SyncRule for MangleRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn transform<'a>(&self, events: Vec<Event<'a>>) -> Result<Vec<Event<'a>>, BoxError> {
        let mut out = Vec::with_capacity(events.len());
        let mut in_email = false;

        for event in events {
            match event {
                Event::Start(Tag::Link {
                    link_type: LinkType::Email,
                    dest_url,
                    ..
                }) => {
                    in_email = true;
                    let href = mangle(&format!("mailto:{}", dest_url));
                    out.push(Event::InlineHtml(CowStr::from(format!("<a href=\"{}\">", href))));
                }
                Event::Text(text) if in_email => {
                    out.push(Event::InlineHtml(CowStr::from(mangle(&text))));
                }
                Event::End(TagEnd::Link) if in_email => {
                    in_email = false;
                    out.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                }
                other => out.push(other),
            }
        }

        Ok(out)
    }
}
