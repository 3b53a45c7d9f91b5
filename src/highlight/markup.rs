//! Span list → highlighted HTML

use std::ops::Range;

/// A classified (or plain) slice of the highlighted source
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span<'a> {
    pub range: Range<usize>,
    pub kind: Option<&'a str>,
}

/// Merge adjacent spans with same kind
pub(crate) fn merge_adjacent(spans: &mut Vec<Span<'_>>) {
    if spans.len() < 2 {
        return;
    }

    let mut write_idx = 0;
    for read_idx in 1..spans.len() {
        if spans[write_idx].kind == spans[read_idx].kind
            && spans[write_idx].range.end == spans[read_idx].range.start
        {
            spans[write_idx].range.end = spans[read_idx].range.end;
        } else {
            write_idx += 1;
            if write_idx != read_idx {
                spans[write_idx] = spans[read_idx].clone();
            }
        }
    }
    spans.truncate(write_idx + 1);
}

/// Write spans as `shj-syn-*` classed HTML, optionally with a line-number gutter
pub(crate) fn to_html(source: &str, spans: &[Span<'_>], hide_line_numbers: bool) -> String {
    let mut out = String::with_capacity(source.len() * 2);

    if !hide_line_numbers {
        out.push_str("<div class=\"shj-numbers\">");
        for _ in 0..source.lines().count().max(1) {
            out.push_str("<div></div>");
        }
        out.push_str("</div><div>");
    }

    for span in spans {
        let text = &source[span.range.clone()];
        match span.kind {
            Some(kind) => {
                out.push_str("<span class=\"shj-syn-");
                escape_html(&mut out, kind);
                out.push_str("\">");
                escape_html(&mut out, text);
                out.push_str("</span>");
            }
            None => escape_html(&mut out, text),
        }
    }

    if !hide_line_numbers {
        out.push_str("</div>");
    }

    out
}

/// Unclassified output for the `plain` language
pub(crate) fn plain(source: &str, hide_line_numbers: bool) -> String {
    let spans = if source.is_empty() {
        Vec::new()
    } else {
        vec![Span {
            range: 0..source.len(),
            kind: None,
        }]
    };
    to_html(source, &spans, hide_line_numbers)
}

pub(crate) fn escape_html(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
