use folio_core::codec::{self, DecodeOutcome};
use folio_core::model::rich_text::{Block, BlockType, HeadingLevel, InlineStyle, RichDocument};

const BROWSER_PAYLOAD: &str = r#"{
  "blocks": [
    {"key":"a1b2c","text":"About me","type":"header-two","depth":0,"inlineStyleRanges":[],"entityRanges":[],"data":{}},
    {"key":"d3e4f","text":"I build tools with Rust.","type":"unstyled","depth":0,
     "inlineStyleRanges":[{"offset":19,"length":4,"style":"BOLD"}],
     "entityRanges":[{"offset":0,"length":1,"key":0}],"data":{}},
    {"key":"g5h6i","text":"CLIs","type":"unordered-list-item","depth":0,"inlineStyleRanges":[],"entityRanges":[],"data":{}},
    {"key":"j7k8l","text":"Parsers","type":"unordered-list-item","depth":0,"inlineStyleRanges":[],"entityRanges":[],"data":{}}
  ],
  "entityMap": {"0": {"type":"LINK","mutability":"MUTABLE","data":{"url":"https://example.com/me"}}}
}"#;

fn sample_document() -> RichDocument {
    let mut doc = RichDocument::new()
        .with_block(Block::with_key("h", BlockType::Header(HeadingLevel::H1), "Title"))
        .with_block(
            Block::with_key("p", BlockType::Unstyled, "Bold and italic")
                .styled(InlineStyle::Bold, 0, 4)
                .styled(InlineStyle::Italic, 9, 6),
        )
        .with_block(Block::with_key("q", BlockType::Blockquote, "Quote"))
        .with_block(Block::with_key("x", BlockType::Other("image-caption".to_string()), "kept"));
    let key = doc.add_link("https://example.com");
    doc.blocks
        .push(Block::with_key("l", BlockType::Unstyled, "link").linked(key, 0, 4));
    doc
}

#[test]
fn encode_then_decode_restores_document() {
    let doc = sample_document();
    let payload = codec::encode(&doc);

    assert_eq!(codec::decode(&payload), DecodeOutcome::Parsed(doc.clone()));
    assert_eq!(codec::encode(&doc), payload, "encoding must be deterministic");
    assert!(payload.contains(r#""type":"image-caption""#));
    assert!(payload.contains(r#""entityMap""#));
}

#[test]
fn browser_payload_renders_to_html() {
    let html = codec::render(Some(BROWSER_PAYLOAD));
    assert_eq!(
        html,
        "<h2>About me</h2>\n\
<p><a href=\"https://example.com/me\">I</a> build tools with <strong>Rust</strong>.</p>\n\
<ul>\n  <li>CLIs</li>\n  <li>Parsers</li>\n</ul>"
    );
}

#[test]
fn browser_payload_round_trips_structurally() {
    let DecodeOutcome::Parsed(doc) = codec::decode(BROWSER_PAYLOAD) else {
        panic!("browser payload should parse");
    };
    assert_eq!(doc.blocks.len(), 4);
    assert_eq!(doc.blocks[0].kind, BlockType::Header(HeadingLevel::H2));
    assert_eq!(codec::decode(&codec::encode(&doc)), DecodeOutcome::Parsed(doc));
}

#[test]
fn legacy_plain_text_falls_back_to_escaped_paragraph() {
    let outcome = codec::decode("<b>hello</b> & goodbye");
    assert!(outcome.is_fallback());

    let doc = outcome.into_document();
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].text, "<b>hello</b> & goodbye");

    assert_eq!(
        codec::render(Some("<b>hello</b> & goodbye")),
        "<p>&lt;b&gt;hello&lt;/b&gt; &amp; goodbye</p>"
    );
}

#[test]
fn truncated_json_falls_back_without_error() {
    let payload = r#"{"blocks":[{"text":"unterminated"#;
    assert_eq!(
        codec::decode(payload),
        DecodeOutcome::Fallback(payload.to_string())
    );
}

#[test]
fn style_offsets_are_utf16_units() {
    let doc = RichDocument::new().with_block(
        Block::with_key("k", BlockType::Unstyled, "😀 bold").styled(InlineStyle::Bold, 3, 4),
    );
    assert_eq!(
        codec::render(Some(&codec::encode(&doc))),
        "<p>😀 <strong>bold</strong></p>"
    );
}

#[test]
fn list_kinds_switch_wrappers_and_empty_blocks_break() {
    let doc = RichDocument::new()
        .with_block(Block::with_key("a", BlockType::OrderedListItem, "one"))
        .with_block(Block::with_key("b", BlockType::UnorderedListItem, "dot"))
        .with_block(Block::with_key("c", BlockType::Unstyled, ""))
        .with_block(Block::with_key("d", BlockType::CodeBlock, "let x = 1;\nx < 2"));
    assert_eq!(
        codec::render(Some(&codec::encode(&doc))),
        "<ol>\n  <li>one</li>\n</ol>\n<ul>\n  <li>dot</li>\n</ul>\n<p><br></p>\n\
<pre><code>let x = 1;<br>x &lt; 2</code></pre>"
    );
}

#[test]
fn unknown_styles_are_ignored_in_html() {
    let doc = RichDocument::new().with_block(
        Block::with_key("k", BlockType::Unstyled, "hi")
            .styled(InlineStyle::Other("HIGHLIGHT".to_string()), 0, 2),
    );
    assert_eq!(codec::render(Some(&codec::encode(&doc))), "<p>hi</p>");
}

#[test]
fn preview_uses_plain_text_of_documents() {
    let payload = codec::encode(
        &RichDocument::new()
            .with_block(Block::with_key("a", BlockType::Header(HeadingLevel::H1), "Intro"))
            .with_block(Block::with_key("b", BlockType::Unstyled, "Body text here")),
    );
    assert_eq!(
        codec::preview_text(&payload, 10).as_deref(),
        Some("Intro Body...")
    );
}

#[test]
fn every_heading_level_survives_save_and_renders_the_same() {
    for level in HeadingLevel::ALL {
        let doc = RichDocument::new().with_block(Block::with_key("k", BlockType::Header(level), "T"));
        let payload = codec::encode(&doc);

        assert_eq!(codec::decode(&payload), DecodeOutcome::Parsed(doc.clone()));
        let expected = format!("<h{n}>T</h{n}>", n = level.number());
        assert_eq!(codec::render(Some(payload.as_str())), expected);
        assert_eq!(codec::html::document_to_html(&doc), expected);
    }
}
