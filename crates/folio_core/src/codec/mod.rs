//! Rich-text payload codec.
//!
//! # Responsibility
//! - Encode editable documents into the portable JSON payload stored by the
//!   API, and decode payloads back for editing.
//! - Render payloads to HTML fragments for read-only display.
//!
//! # Invariants
//! - `decode(&encode(doc))` is `DecodeOutcome::Parsed(doc)`.
//! - Decoding and rendering never fail: anything that is not a raw
//!   document payload is treated as one literal paragraph.
//! - Blank or absent payloads render as a placeholder, never as empty markup.

pub mod html;

use crate::model::rich_text::RichDocument;
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder wording used when no caller-specific text is given.
pub const NOT_SET_PLACEHOLDER: &str = "Not set";

const EMPTY_DOCUMENT_PAYLOAD: &str = r#"{"blocks":[],"entityMap":{}}"#;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Result of decoding a stored payload.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Payload was a raw document.
    Parsed(RichDocument),
    /// Payload was not a raw document; carries the whole payload verbatim.
    Fallback(String),
}

impl DecodeOutcome {
    /// Converts the outcome into an editable document.
    ///
    /// A fallback becomes one unstyled paragraph holding the literal text.
    pub fn into_document(self) -> RichDocument {
        match self {
            Self::Parsed(document) => document,
            Self::Fallback(literal) => RichDocument::paragraph(literal),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Serializes a document into its JSON payload.
///
/// Output is deterministic for structurally equal documents.
pub fn encode(document: &RichDocument) -> String {
    match serde_json::to_string(document) {
        Ok(payload) => payload,
        Err(err) => {
            error!("event=rich_text_encode module=codec status=error error={err}");
            EMPTY_DOCUMENT_PAYLOAD.to_string()
        }
    }
}

/// Parses a stored payload, falling back to literal text.
pub fn decode(payload: &str) -> DecodeOutcome {
    match serde_json::from_str::<RichDocument>(payload) {
        Ok(document) => DecodeOutcome::Parsed(document),
        Err(err) => {
            debug!(
                "event=rich_text_decode module=codec status=fallback payload_len={} reason={}",
                payload.len(),
                error_category(&err)
            );
            DecodeOutcome::Fallback(payload.to_string())
        }
    }
}

/// Renders a payload with the default "not set" placeholder.
pub fn render(payload: Option<&str>) -> String {
    render_or(payload, NOT_SET_PLACEHOLDER)
}

/// Renders a payload, using `placeholder` for blank or empty content.
pub fn render_or(payload: Option<&str>, placeholder: &str) -> String {
    let Some(payload) = payload.filter(|value| !value.trim().is_empty()) else {
        return html::placeholder(placeholder);
    };

    let document = decode(payload).into_document();
    if document.is_empty() {
        return html::placeholder(placeholder);
    }
    html::document_to_html(&document)
}

/// Plain text of a payload, block texts separated by newlines.
pub fn plain_text(payload: &str) -> String {
    decode(payload).into_document().plain_text()
}

/// Whitespace-normalized text of a payload cut to `limit` characters.
///
/// Returns `None` when the payload carries no visible text.
pub fn preview_text(payload: &str, limit: usize) -> Option<String> {
    let text = plain_text(payload);
    let normalized = WHITESPACE_RE.replace_all(&text, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut preview: String = trimmed.chars().take(limit).collect();
    if trimmed.chars().count() > limit {
        preview.push_str("...");
    }
    Some(preview)
}

fn error_category(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        serde_json::error::Category::Io => "io",
        serde_json::error::Category::Syntax => "syntax",
        serde_json::error::Category::Data => "data",
        serde_json::error::Category::Eof => "eof",
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, preview_text, render, render_or, DecodeOutcome};

    #[test]
    fn decode_non_document_json_falls_back() {
        assert_eq!(decode("42"), DecodeOutcome::Fallback("42".to_string()));
        assert_eq!(
            decode(r#"{"title":"x"}"#),
            DecodeOutcome::Fallback(r#"{"title":"x"}"#.to_string())
        );
    }

    #[test]
    fn render_blank_payload_uses_placeholder() {
        assert_eq!(render(None), "<p class=\"placeholder\">Not set</p>");
        assert_eq!(
            render_or(Some("  "), "Nothing yet"),
            "<p class=\"placeholder\">Nothing yet</p>"
        );
        assert_eq!(
            render(Some(r#"{"blocks":[],"entityMap":{}}"#)),
            "<p class=\"placeholder\">Not set</p>"
        );
    }

    #[test]
    fn preview_text_normalizes_and_truncates() {
        let preview = preview_text("one\n\n  two   three", 9).expect("preview should exist");
        assert_eq!(preview, "one two t...");
        assert_eq!(preview_text("   ", 10), None);
    }
}
