//! Read-only HTML export for rich-text documents.
//!
//! # Invariants
//! - Every piece of document text is escaped; markup only comes from block
//!   types, known inline styles and sanitized link entities.
//! - Consecutive list items of the same kind share one `<ul>`/`<ol>`.
//! - Out-of-range style or entity spans are clipped to the block text.

use crate::model::rich_text::{Block, BlockType, InlineStyle, RichDocument};
use once_cell::sync::Lazy;
use regex::Regex;

// Absolute http(s)/mailto URLs, or relative references whose first path
// segment carries no scheme.
static SAFE_HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:(?:https?|mailto):|[^:/?#]*(?:[/?#]|$))").expect("valid href regex")
});

const STYLE_BOLD: u8 = 1;
const STYLE_ITALIC: u8 = 1 << 1;
const STYLE_UNDERLINE: u8 = 1 << 2;
const STYLE_CODE: u8 = 1 << 3;
const STYLE_STRIKETHROUGH: u8 = 1 << 4;

const STYLE_TAGS: [(u8, &str); 5] = [
    (STYLE_BOLD, "strong"),
    (STYLE_ITALIC, "em"),
    (STYLE_UNDERLINE, "u"),
    (STYLE_CODE, "code"),
    (STYLE_STRIKETHROUGH, "del"),
];

/// Escapes text for use between tags.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes text for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Returns the trimmed URL when it is safe to emit as an `href`.
pub fn safe_href(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() || !SAFE_HREF_RE.is_match(trimmed) {
        return None;
    }
    Some(trimmed)
}

/// Renders a placeholder paragraph for missing content.
pub fn placeholder(text: &str) -> String {
    format!("<p class=\"placeholder\">{}</p>", escape_text(text))
}

/// Renders a whole document as an HTML fragment.
pub fn document_to_html(document: &RichDocument) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(document.blocks.len());
    let mut open_list: Option<&'static str> = None;

    for block in &document.blocks {
        let list_tag = block.kind.list_tag();
        if open_list != list_tag {
            if let Some(tag) = open_list {
                lines.push(format!("</{tag}>"));
            }
            if let Some(tag) = list_tag {
                lines.push(format!("<{tag}>"));
            }
            open_list = list_tag;
        }

        let inner = render_inline(block, document);
        let line = match &block.kind {
            BlockType::Header(level) => {
                let level = level.number();
                format!("<h{level}>{inner}</h{level}>")
            }
            BlockType::UnorderedListItem | BlockType::OrderedListItem => {
                format!("  <li>{inner}</li>")
            }
            BlockType::Blockquote => format!("<blockquote>{inner}</blockquote>"),
            BlockType::CodeBlock => format!("<pre><code>{inner}</code></pre>"),
            BlockType::Atomic => format!("<figure>{inner}</figure>"),
            BlockType::Unstyled | BlockType::Other(_) => format!("<p>{inner}</p>"),
        };
        lines.push(line);
    }

    if let Some(tag) = open_list {
        lines.push(format!("</{tag}>"));
    }

    lines.join("\n")
}

fn style_bit(style: &InlineStyle) -> u8 {
    match style {
        InlineStyle::Bold => STYLE_BOLD,
        InlineStyle::Italic => STYLE_ITALIC,
        InlineStyle::Underline => STYLE_UNDERLINE,
        InlineStyle::Code => STYLE_CODE,
        InlineStyle::Strikethrough => STYLE_STRIKETHROUGH,
        InlineStyle::Other(_) => 0,
    }
}

fn covers(offset: u32, length: u32, position: u32) -> bool {
    position >= offset && position < offset.saturating_add(length)
}

fn render_inline(block: &Block, document: &RichDocument) -> String {
    if block.text.is_empty() {
        return "<br>".to_string();
    }

    let mut html = String::with_capacity(block.text.len());
    let mut segment = String::new();
    let mut current: Option<(u8, Option<&str>)> = None;
    let mut position: u32 = 0;

    for ch in block.text.chars() {
        let mask = block
            .inline_style_ranges
            .iter()
            .filter(|range| covers(range.offset, range.length, position))
            .fold(0u8, |mask, range| mask | style_bit(&range.style));
        let href = block
            .entity_ranges
            .iter()
            .filter(|range| covers(range.offset, range.length, position))
            .find_map(|range| link_href(document, range.key));
        let key = (mask, href);

        if current != Some(key) {
            if let Some((mask, href)) = current {
                push_segment(&mut html, &segment, mask, href);
            }
            segment.clear();
            current = Some(key);
        }
        segment.push(ch);
        position += ch.len_utf16() as u32;
    }

    if let Some((mask, href)) = current {
        push_segment(&mut html, &segment, mask, href);
    }

    html
}

fn link_href(document: &RichDocument, key: u32) -> Option<&str> {
    let entity = document.entity(key)?;
    if !entity.kind.eq_ignore_ascii_case("LINK") {
        return None;
    }
    let url = entity
        .data
        .get("url")
        .or_else(|| entity.data.get("href"))
        .and_then(|value| value.as_str())?;
    safe_href(url)
}

fn push_segment(html: &mut String, text: &str, mask: u8, href: Option<&str>) {
    if let Some(href) = href {
        html.push_str(&format!("<a href=\"{}\">", escape_attr(href)));
    }
    for (bit, tag) in STYLE_TAGS {
        if mask & bit != 0 {
            html.push_str(&format!("<{tag}>"));
        }
    }

    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        html.push_str(&escape_text(first));
    }
    for line in lines {
        html.push_str("<br>");
        html.push_str(&escape_text(line));
    }

    for (bit, tag) in STYLE_TAGS.iter().rev() {
        if mask & bit != 0 {
            html.push_str(&format!("</{tag}>"));
        }
    }
    if href.is_some() {
        html.push_str("</a>");
    }
}
