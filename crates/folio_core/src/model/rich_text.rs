//! Rich-text document model.
//!
//! # Responsibility
//! - Mirror the raw block/run structure written by the browser editor.
//! - Keep unknown block types and inline styles verbatim so stored payloads
//!   survive a decode/encode cycle unchanged.
//!
//! # Invariants
//! - Style and entity offsets/lengths are UTF-16 code units.
//! - Field order of `Block` is the wire order; `entity_map` is sorted, so
//!   serialization is deterministic for equal documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

const BLOCK_KEY_LEN: usize = 5;

/// Editable rich-text document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichDocument {
    pub blocks: Vec<Block>,
    #[serde(rename = "entityMap", default)]
    pub entity_map: BTreeMap<String, Entity>,
}

/// One paragraph-level unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub key: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: BlockType,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<StyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Block type tag. Unrecognized editor types are carried in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    #[default]
    Unstyled,
    Header(HeadingLevel),
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    Atomic,
    Other(String),
}

/// Heading level of a header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

/// Inline style tag applied to a run of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Other(String),
}

/// Styled span inside one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: u32,
    pub length: u32,
    pub style: InlineStyle,
}

/// Span of a block bound to an entry of the document entity map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub offset: u32,
    pub length: u32,
    pub key: u32,
}

/// Out-of-band object referenced by entity ranges (links, images, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_mutability")]
    pub mutability: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

fn default_mutability() -> String {
    "MUTABLE".to_string()
}

impl RichDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding `text` as one unstyled paragraph.
    ///
    /// Line breaks stay inside the paragraph; they are not split into blocks.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::new(BlockType::Unstyled, text)],
            entity_map: BTreeMap::new(),
        }
    }

    /// Appends one block and returns the document for chaining.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Registers a link entity and returns its numeric key.
    pub fn add_link(&mut self, url: impl Into<String>) -> u32 {
        let key = self
            .entity_map
            .keys()
            .filter_map(|key| key.parse::<u32>().ok())
            .max()
            .map_or(0, |max| max + 1);
        let mut data = Map::new();
        data.insert("url".to_string(), Value::String(url.into()));
        self.entity_map.insert(
            key.to_string(),
            Entity {
                kind: "LINK".to_string(),
                mutability: default_mutability(),
                data,
            },
        );
        key
    }

    /// Looks up an entity by the numeric key used in entity ranges.
    pub fn entity(&self, key: u32) -> Option<&Entity> {
        self.entity_map.get(&key.to_string())
    }

    /// Returns whether the document has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block texts joined by newlines, without any markup.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Block {
    /// Creates a block with a freshly generated key.
    pub fn new(kind: BlockType, text: impl Into<String>) -> Self {
        Self::with_key(generate_block_key(), kind, text)
    }

    /// Creates a block with a caller-provided key.
    pub fn with_key(key: impl Into<String>, kind: BlockType, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            kind,
            depth: 0,
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
            data: Map::new(),
        }
    }

    /// Adds a style range in UTF-16 units.
    pub fn styled(mut self, style: InlineStyle, offset: u32, length: u32) -> Self {
        self.inline_style_ranges.push(StyleRange {
            offset,
            length,
            style,
        });
        self
    }

    /// Binds a span to an entity key in UTF-16 units.
    pub fn linked(mut self, key: u32, offset: u32, length: u32) -> Self {
        self.entity_ranges.push(EntityRange {
            offset,
            length,
            key,
        });
        self
    }

    /// Length of the block text in UTF-16 code units.
    pub fn utf16_len(&self) -> u32 {
        self.text.encode_utf16().count() as u32
    }
}

impl BlockType {
    /// Wrapper tag shared by consecutive list items of this type.
    pub fn list_tag(&self) -> Option<&'static str> {
        match self {
            Self::UnorderedListItem => Some("ul"),
            Self::OrderedListItem => Some("ol"),
            _ => None,
        }
    }
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 6] = [
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
    ];

    /// Maps `1..=6` to a level; anything else is `None`.
    pub fn from_number(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level).checked_sub(1)?).copied()
    }

    pub fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    fn block_tag(self) -> &'static str {
        match self {
            Self::H1 => "header-one",
            Self::H2 => "header-two",
            Self::H3 => "header-three",
            Self::H4 => "header-four",
            Self::H5 => "header-five",
            Self::H6 => "header-six",
        }
    }
}

impl From<String> for BlockType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unstyled" | "paragraph" => Self::Unstyled,
            "header-one" => Self::Header(HeadingLevel::H1),
            "header-two" => Self::Header(HeadingLevel::H2),
            "header-three" => Self::Header(HeadingLevel::H3),
            "header-four" => Self::Header(HeadingLevel::H4),
            "header-five" => Self::Header(HeadingLevel::H5),
            "header-six" => Self::Header(HeadingLevel::H6),
            "unordered-list-item" => Self::UnorderedListItem,
            "ordered-list-item" => Self::OrderedListItem,
            "blockquote" => Self::Blockquote,
            "code-block" => Self::CodeBlock,
            "atomic" => Self::Atomic,
            _ => Self::Other(value),
        }
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::Unstyled => "unstyled".to_string(),
            BlockType::Header(level) => level.block_tag().to_string(),
            BlockType::UnorderedListItem => "unordered-list-item".to_string(),
            BlockType::OrderedListItem => "ordered-list-item".to_string(),
            BlockType::Blockquote => "blockquote".to_string(),
            BlockType::CodeBlock => "code-block".to_string(),
            BlockType::Atomic => "atomic".to_string(),
            BlockType::Other(raw) => raw,
        }
    }
}

impl From<String> for InlineStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "BOLD" => Self::Bold,
            "ITALIC" => Self::Italic,
            "UNDERLINE" => Self::Underline,
            "CODE" => Self::Code,
            "STRIKETHROUGH" => Self::Strikethrough,
            _ => Self::Other(value),
        }
    }
}

impl From<InlineStyle> for String {
    fn from(value: InlineStyle) -> Self {
        match value {
            InlineStyle::Bold => "BOLD".to_string(),
            InlineStyle::Italic => "ITALIC".to_string(),
            InlineStyle::Underline => "UNDERLINE".to_string(),
            InlineStyle::Code => "CODE".to_string(),
            InlineStyle::Strikethrough => "STRIKETHROUGH".to_string(),
            InlineStyle::Other(raw) => raw,
        }
    }
}

fn generate_block_key() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(BLOCK_KEY_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Block, BlockType, HeadingLevel, InlineStyle, RichDocument};

    #[test]
    fn block_type_keeps_unknown_tags_verbatim() {
        let kind = BlockType::from("section-divider".to_string());
        assert_eq!(kind, BlockType::Other("section-divider".to_string()));
        assert_eq!(String::from(kind), "section-divider");
        assert_eq!(String::from(BlockType::Header(HeadingLevel::H3)), "header-three");
    }

    #[test]
    fn heading_levels_map_only_one_through_six() {
        assert_eq!(HeadingLevel::from_number(0), None);
        assert_eq!(HeadingLevel::from_number(7), None);
        for level in HeadingLevel::ALL {
            assert_eq!(HeadingLevel::from_number(level.number()), Some(level));
            let tag = String::from(BlockType::Header(level));
            assert_eq!(BlockType::from(tag), BlockType::Header(level));
        }
    }

    #[test]
    fn generated_block_keys_are_short() {
        let block = Block::new(BlockType::Unstyled, "x");
        assert_eq!(block.key.len(), 5);
    }

    #[test]
    fn add_link_allocates_increasing_keys() {
        let mut doc = RichDocument::paragraph("a");
        assert_eq!(doc.add_link("https://a.example"), 0);
        assert_eq!(doc.add_link("https://b.example"), 1);
        assert_eq!(doc.entity(1).unwrap().kind, "LINK");
    }

    #[test]
    fn utf16_len_counts_surrogate_pairs() {
        let block = Block::new(BlockType::Unstyled, "a😀").styled(InlineStyle::Bold, 1, 2);
        assert_eq!(block.utf16_len(), 3);
    }
}
