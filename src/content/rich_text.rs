//! Structured rich text and its plain-text and HTML projections
//!
//! The content backend delivers rich text as a list of blocks, each with a
//! flat `text` and a list of `spans` given as character offsets. Spans are
//! turned into a nested inline tree here so rendering is a plain structural
//! match.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::{html_escape, image_tag, link_to};

/// A rich text document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<Block>);

/// Block-level element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    Paragraph { content: Vec<Inline> },
    Heading { level: u8, content: Vec<Inline> },
    ListItem { ordered: bool, content: Vec<Inline> },
    Preformatted { text: String },
    Image { url: String, alt: String },
}

/// Inline element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inline {
    Text { text: String },
    Strong { content: Vec<Inline> },
    Emphasis { content: Vec<Inline> },
    Link { url: String, content: Vec<Inline> },
}

#[derive(Debug, Clone)]
enum SpanKind {
    Strong,
    Emphasis,
    Link(String),
}

#[derive(Debug, Clone)]
struct Span {
    start: usize,
    end: usize,
    kind: SpanKind,
}

impl SpanKind {
    fn wrap(&self, content: Vec<Inline>) -> Inline {
        match self {
            SpanKind::Strong => Inline::Strong { content },
            SpanKind::Emphasis => Inline::Emphasis { content },
            SpanKind::Link(url) => Inline::Link {
                url: url.clone(),
                content,
            },
        }
    }
}

impl RichText {
    /// Convert the backend's JSON representation
    ///
    /// Never fails: unsupported blocks are skipped, a bare string becomes a
    /// single paragraph and anything else yields an empty document.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self(items.iter().filter_map(parse_block).collect()),
            Value::String(text) if !text.trim().is_empty() => Self(vec![Block::Paragraph {
                content: vec![Inline::Text { text: text.clone() }],
            }]),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All text in document order without markup, one block per line
    pub fn as_plain_text(&self) -> String {
        self.0
            .iter()
            .map(block_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render to escaped HTML, grouping consecutive list items
    pub fn as_markup(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut open_list: Option<bool> = None;

        for block in &self.0 {
            let list = match block {
                Block::ListItem { ordered, .. } => Some(*ordered),
                _ => None,
            };

            if open_list != list {
                if let Some(ordered) = open_list {
                    lines.push(list_tag(ordered, true));
                }
                if let Some(ordered) = list {
                    lines.push(list_tag(ordered, false));
                }
                open_list = list;
            }

            lines.push(render_block(block));
        }

        if let Some(ordered) = open_list {
            lines.push(list_tag(ordered, true));
        }

        lines.join("\n")
    }
}

fn parse_block(value: &Value) -> Option<Block> {
    let kind = value.get("type").and_then(Value::as_str)?;
    let text = value.get("text").and_then(Value::as_str).unwrap_or_default();

    let block = match kind {
        "paragraph" => Block::Paragraph {
            content: parse_inlines(text, value.get("spans")),
        },
        "list-item" | "o-list-item" => Block::ListItem {
            ordered: kind == "o-list-item",
            content: parse_inlines(text, value.get("spans")),
        },
        "preformatted" => Block::Preformatted {
            text: text.to_string(),
        },
        "image" => {
            let url = value.get("url").and_then(Value::as_str)?;
            Block::Image {
                url: url.to_string(),
                alt: value
                    .get("alt")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }
        }
        _ => match heading_level(kind) {
            Some(level) => Block::Heading {
                level,
                content: parse_inlines(text, value.get("spans")),
            },
            None => {
                tracing::debug!("Skipping unsupported rich text block {:?}", kind);
                return None;
            }
        },
    };

    Some(block)
}

fn heading_level(kind: &str) -> Option<u8> {
    kind.strip_prefix("heading")
        .and_then(|level| level.parse().ok())
        .filter(|level| (1..=6).contains(level))
}

fn parse_span(value: &Value, len: usize) -> Option<Span> {
    let start = value.get("start").and_then(Value::as_u64)? as usize;
    let end = (value.get("end").and_then(Value::as_u64)? as usize).min(len);
    if start >= end {
        return None;
    }

    let kind = match value.get("type").and_then(Value::as_str)? {
        "strong" => SpanKind::Strong,
        "em" => SpanKind::Emphasis,
        "hyperlink" => {
            let url = value
                .get("data")
                .and_then(|data| data.get("url"))
                .and_then(Value::as_str)?;
            SpanKind::Link(url.to_string())
        }
        _ => return None,
    };

    Some(Span { start, end, kind })
}

fn parse_inlines(text: &str, spans: Option<&Value>) -> Vec<Inline> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans: Vec<Span> = spans
        .and_then(Value::as_array)
        .map(|spans| {
            spans
                .iter()
                .filter_map(|span| parse_span(span, chars.len()))
                .collect()
        })
        .unwrap_or_default();

    // Outer spans first: earliest start, then longest
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    build_inlines(&chars, &spans, 0, chars.len())
}

/// Nest `spans` over `chars[start..end]`
///
/// A span that crosses the boundary of an enclosing one is dropped; its
/// text is still emitted by the enclosing level.
fn build_inlines(chars: &[char], spans: &[Span], start: usize, end: usize) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut pos = start;

    for (idx, span) in spans.iter().enumerate() {
        if span.start < pos || span.end > end {
            continue;
        }

        push_text(&mut inlines, &chars[pos..span.start]);
        let children = build_inlines(chars, &spans[idx + 1..], span.start, span.end);
        inlines.push(span.kind.wrap(children));
        pos = span.end;
    }

    push_text(&mut inlines, &chars[pos..end]);
    inlines
}

fn push_text(inlines: &mut Vec<Inline>, chars: &[char]) {
    if !chars.is_empty() {
        inlines.push(Inline::Text {
            text: chars.iter().collect(),
        });
    }
}

fn block_text(block: &Block) -> String {
    match block {
        Block::Paragraph { content }
        | Block::Heading { content, .. }
        | Block::ListItem { content, .. } => inlines_text(content),
        Block::Preformatted { text } => text.clone(),
        Block::Image { .. } => String::new(),
    }
}

fn inlines_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text: t } => text.push_str(t),
            Inline::Strong { content }
            | Inline::Emphasis { content }
            | Inline::Link { content, .. } => text.push_str(&inlines_text(content)),
        }
    }
    text
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph { content } => format!("<p>{}</p>", render_inlines(content)),
        Block::Heading { level, content } => {
            format!("<h{0}>{1}</h{0}>", level, render_inlines(content))
        }
        Block::ListItem { content, .. } => format!("<li>{}</li>", render_inlines(content)),
        Block::Preformatted { text } => format!("<pre>{}</pre>", html_escape(text)),
        Block::Image { url, alt } => format!(r#"<p class="block-img">{}</p>"#, image_tag(url, alt)),
    }
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut html = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text } => html.push_str(&html_escape(text)),
            Inline::Strong { content } => {
                html.push_str(&format!("<strong>{}</strong>", render_inlines(content)))
            }
            Inline::Emphasis { content } => {
                html.push_str(&format!("<em>{}</em>", render_inlines(content)))
            }
            Inline::Link { url, content } => html.push_str(&link_to(url, &render_inlines(content))),
        }
    }
    html
}

fn list_tag(ordered: bool, close: bool) -> String {
    let name = if ordered { "ol" } else { "ul" };
    if close {
        format!("</{}>", name)
    } else {
        format!("<{}>", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Inline {
        Inline::Text {
            text: s.to_string(),
        }
    }

    /// Recover the visible text of rendered markup
    fn markup_to_text(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn sample() -> RichText {
        RichText::from_value(&json!([
            { "type": "heading2", "text": "Getting started", "spans": [] },
            {
                "type": "paragraph",
                "text": "Read the docs at the site & enjoy <it>.",
                "spans": [
                    { "start": 0, "end": 4, "type": "strong" },
                    { "start": 9, "end": 13, "type": "em" },
                    { "start": 17, "end": 25, "type": "hyperlink", "data": { "url": "https://example.com" } }
                ]
            },
            { "type": "list-item", "text": "first", "spans": [] },
            { "type": "list-item", "text": "second", "spans": [] },
            { "type": "o-list-item", "text": "one", "spans": [] },
            { "type": "preformatted", "text": "let x = 1 < 2;", "spans": [] },
            { "type": "image", "url": "https://images.test/a.png", "alt": "An image" }
        ]))
    }

    #[test]
    fn test_parse_blocks() {
        let rt = sample();
        assert_eq!(rt.0.len(), 7);
        assert!(matches!(rt.0[0], Block::Heading { level: 2, .. }));
        assert!(matches!(rt.0[2], Block::ListItem { ordered: false, .. }));
        assert!(matches!(rt.0[4], Block::ListItem { ordered: true, .. }));
        assert_eq!(
            rt.0[6],
            Block::Image {
                url: "https://images.test/a.png".to_string(),
                alt: "An image".to_string()
            }
        );
    }

    #[test]
    fn test_spans_become_inlines() {
        let rt = sample();
        let Block::Paragraph { content } = &rt.0[1] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            content,
            &vec![
                Inline::Strong {
                    content: vec![text("Read")]
                },
                text(" the "),
                Inline::Emphasis {
                    content: vec![text("docs")]
                },
                text(" at "),
                Inline::Link {
                    url: "https://example.com".to_string(),
                    content: vec![text("the site")]
                },
                text(" & enjoy <it>."),
            ]
        );
    }

    #[test]
    fn test_nested_spans() {
        let rt = RichText::from_value(&json!([{
            "type": "paragraph",
            "text": "bold and italic",
            "spans": [
                { "start": 9, "end": 15, "type": "em" },
                { "start": 0, "end": 15, "type": "strong" }
            ]
        }]));
        assert_eq!(
            rt.as_markup(),
            "<p><strong>bold and <em>italic</em></strong></p>"
        );
    }

    #[test]
    fn test_crossing_span_keeps_text() {
        let rt = RichText::from_value(&json!([{
            "type": "paragraph",
            "text": "abcdef",
            "spans": [
                { "start": 0, "end": 4, "type": "strong" },
                { "start": 2, "end": 6, "type": "em" }
            ]
        }]));
        assert_eq!(rt.as_markup(), "<p><strong>abcd</strong>ef</p>");
        assert_eq!(rt.as_plain_text(), "abcdef");
    }

    #[test]
    fn test_span_offsets_are_characters() {
        let rt = RichText::from_value(&json!([{
            "type": "paragraph",
            "text": "ação rápida",
            "spans": [{ "start": 5, "end": 11, "type": "strong" }]
        }]));
        assert_eq!(rt.as_markup(), "<p>ação <strong>rápida</strong></p>");
    }

    #[test]
    fn test_unknown_blocks_and_spans() {
        let rt = RichText::from_value(&json!([
            { "type": "embed", "oembed": {} },
            { "type": "heading9", "text": "nope" },
            {
                "type": "paragraph",
                "text": "label here",
                "spans": [{ "start": 0, "end": 5, "type": "label", "data": { "label": "x" } }]
            },
            "garbage"
        ]));
        assert_eq!(rt.0.len(), 1);
        assert_eq!(rt.as_markup(), "<p>label here</p>");
    }

    #[test]
    fn test_non_array_values() {
        assert!(RichText::from_value(&json!(null)).is_empty());
        assert!(RichText::from_value(&json!(42)).is_empty());
        assert!(RichText::from_value(&json!("")).is_empty());
        assert_eq!(
            RichText::from_value(&json!("plain body")).as_plain_text(),
            "plain body"
        );
    }

    #[test]
    fn test_as_plain_text() {
        assert_eq!(
            sample().as_plain_text(),
            "Getting started\nRead the docs at the site & enjoy <it>.\nfirst\nsecond\none\nlet x = 1 < 2;"
        );
    }

    #[test]
    fn test_as_markup() {
        let expected = [
            "<h2>Getting started</h2>",
            r#"<p><strong>Read</strong> the <em>docs</em> at <a href="https://example.com" target="_blank" rel="noopener">the site</a> &amp; enjoy &lt;it&gt;.</p>"#,
            "<ul>",
            "<li>first</li>",
            "<li>second</li>",
            "</ul>",
            "<ol>",
            "<li>one</li>",
            "</ol>",
            "<pre>let x = 1 &lt; 2;</pre>",
            r#"<p class="block-img"><img src="https://images.test/a.png" alt="An image"></p>"#,
        ]
        .join("\n");
        assert_eq!(sample().as_markup(), expected);
    }

    #[test]
    fn test_markup_escapes_injection() {
        let rt = RichText::from_value(&json!([{
            "type": "paragraph",
            "text": "<script>alert(1)</script>",
            "spans": [{ "start": 0, "end": 8, "type": "hyperlink", "data": { "url": "javascript:alert(1)" } }]
        }]));
        let html = rt.as_markup();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("javascript:"));
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_markup_round_trips_text() {
        let rt = sample();
        assert_eq!(
            tokens(&markup_to_text(&rt.as_markup())),
            tokens(&rt.as_plain_text())
        );
    }

    #[test]
    fn test_empty_rich_text() {
        let rt = RichText::default();
        assert_eq!(rt.as_plain_text(), "");
        assert_eq!(rt.as_markup(), "");
    }
}
