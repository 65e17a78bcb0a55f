//! Article body blocks and the three render projections built from them.
//!
//! Embeddable blocks (code, image, oEmbed, raw HTML) are numbered 1..N in
//! document order. The full-content view replaces them with placeholders
//! carrying that number, and the embeds-only view lists them with the same
//! numbers, so a reader can match "embed #2" across both.

use almanack_logging::almanack_warn;
use serde_json::Value;

use crate::getter::{get_prop, prop_array, prop_i64, prop_str};

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Header { level: u8, content: String },
    List { ordered: bool, items: Vec<String> },
    Text { content: String },
    Divider,
    Code { content: String },
    Image { url: String, caption: String, credits: Vec<String> },
    OEmbed { html: String },
    RawHtml { content: String },
    InterstitialLink { url: String, content: String },
    Unrecognized { kind: String },
}

enum BlockRole {
    Structural,
    Embed,
    Ignored,
}

impl ContentBlock {
    pub fn from_raw(raw: &Value) -> Self {
        let kind = prop_str(raw, "type");
        match kind.as_str() {
            "header" => ContentBlock::Header {
                level: prop_i64(raw, "level")
                    .and_then(|l| u8::try_from(l).ok())
                    .unwrap_or(2),
                content: prop_str(raw, "content"),
            },
            "list" => ContentBlock::List {
                ordered: prop_str(raw, "list_type") == "ordered",
                items: prop_array(raw, "items")
                    .iter()
                    .map(|item| prop_str(item, "content"))
                    .collect(),
            },
            "text" => ContentBlock::Text {
                content: prop_str(raw, "content"),
            },
            "divider" => ContentBlock::Divider,
            "code" => ContentBlock::Code {
                content: prop_str(raw, "content"),
            },
            "image" => ContentBlock::Image {
                url: prop_str(raw, "url"),
                caption: prop_str(raw, "caption"),
                credits: prop_array(raw, "credits.by")
                    .iter()
                    .map(|c| {
                        let name = prop_str(c, "name");
                        if name.is_empty() {
                            prop_str(c, "byline")
                        } else {
                            name
                        }
                    })
                    .collect(),
            },
            "oembed_response" => ContentBlock::OEmbed {
                html: prop_str(raw, "raw_oembed.html"),
            },
            "raw_html" => ContentBlock::RawHtml {
                content: prop_str(raw, "content"),
            },
            "interstitial_link" => ContentBlock::InterstitialLink {
                url: prop_str(raw, "url"),
                content: prop_str(raw, "content"),
            },
            _ => ContentBlock::Unrecognized { kind },
        }
    }

    /// The wire type name of this block.
    pub fn kind(&self) -> &str {
        match self {
            ContentBlock::Header { .. } => "header",
            ContentBlock::List { .. } => "list",
            ContentBlock::Text { .. } => "text",
            ContentBlock::Divider => "divider",
            ContentBlock::Code { .. } => "code",
            ContentBlock::Image { .. } => "image",
            ContentBlock::OEmbed { .. } => "oembed_response",
            ContentBlock::RawHtml { .. } => "raw_html",
            ContentBlock::InterstitialLink { .. } => "interstitial_link",
            ContentBlock::Unrecognized { kind } => kind.as_str(),
        }
    }

    pub fn is_embed(&self) -> bool {
        matches!(self.role(), Some(BlockRole::Embed))
    }

    fn role(&self) -> Option<BlockRole> {
        match self {
            ContentBlock::Header { .. }
            | ContentBlock::List { .. }
            | ContentBlock::Text { .. }
            | ContentBlock::Divider => Some(BlockRole::Structural),
            ContentBlock::Code { .. }
            | ContentBlock::Image { .. }
            | ContentBlock::OEmbed { .. }
            | ContentBlock::RawHtml { .. } => Some(BlockRole::Embed),
            ContentBlock::InterstitialLink { .. } => Some(BlockRole::Ignored),
            ContentBlock::Unrecognized { .. } => None,
        }
    }

    /// Raw HTML for embeds that have a direct HTML rendering.
    pub fn html(&self) -> Option<&str> {
        match self {
            ContentBlock::Code { content } | ContentBlock::RawHtml { content } => {
                Some(content.as_str())
            }
            ContentBlock::OEmbed { html } => Some(html.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentEntry<'a> {
    Block(&'a ContentBlock),
    Placeholder { n: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbedEntry<'a> {
    pub n: usize,
    pub block: &'a ContentBlock,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HtmlEntry<'a> {
    Block(&'a ContentBlock),
    RawHtml(&'a str),
    Placeholder { n: usize },
}

/// Parsed body of an article, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentBlocks {
    blocks: Vec<ContentBlock>,
}

impl ContentBlocks {
    /// Parses the `content_elements` array of a story. Unknown block types
    /// are kept as `Unrecognized` and reported once here.
    pub fn from_story(story: &Value) -> Self {
        let blocks: Vec<ContentBlock> = prop_array(story, "content_elements")
            .iter()
            .map(ContentBlock::from_raw)
            .collect();
        for block in &blocks {
            if let ContentBlock::Unrecognized { kind } = block {
                let id = get_prop(story, "_id").and_then(Value::as_str).unwrap_or("?");
                almanack_warn!("unknown block type {:?} in story {}", kind, id);
            }
        }
        Self { blocks }
    }

    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn embed_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_embed()).count()
    }

    /// Every renderable block, embeds replaced by numbered placeholders.
    pub fn content(&self) -> Vec<ContentEntry<'_>> {
        let mut n = 0;
        self.blocks
            .iter()
            .filter_map(|block| match block.role()? {
                BlockRole::Structural => Some(ContentEntry::Block(block)),
                BlockRole::Embed => {
                    n += 1;
                    Some(ContentEntry::Placeholder { n })
                }
                BlockRole::Ignored => None,
            })
            .collect()
    }

    /// Only the embeds, each with its placeholder number.
    pub fn embeds(&self) -> Vec<EmbedEntry<'_>> {
        self.blocks
            .iter()
            .filter(|block| block.is_embed())
            .enumerate()
            .map(|(i, block)| EmbedEntry { n: i + 1, block })
            .collect()
    }

    /// Flattened HTML view: embeds with an HTML rendering are inlined, the
    /// rest (images) stay placeholders.
    pub fn html(&self) -> Vec<HtmlEntry<'_>> {
        let mut n = 0;
        self.blocks
            .iter()
            .filter_map(|block| match block.role()? {
                BlockRole::Structural => Some(HtmlEntry::Block(block)),
                BlockRole::Embed => {
                    n += 1;
                    Some(match block.html() {
                        Some(html) => HtmlEntry::RawHtml(html),
                        None => HtmlEntry::Placeholder { n },
                    })
                }
                BlockRole::Ignored => None,
            })
            .collect()
    }
}
