//! Markdown-ish Intermediate Representation
//!
//! The dialect models actually produce in this chat: paragraphs, bullet lists
//! (`-`, `*`, `・`, `•`), `**bold**` and `` `code` `` spans. One line is one block.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*・•]\s+(.*)").unwrap());
static INLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|`([^`]+)`").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Code(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MarkdownNode {
    Paragraph(Vec<Inline>),
    /// Consecutive bullet lines, one entry per item.
    List(Vec<Vec<Inline>>),
    /// A blank source line.
    Break,
}

pub struct IrParser;

impl IrParser {
    pub fn parse(markdown: &str) -> Vec<MarkdownNode> {
        let mut nodes = Vec::new();
        let mut items: Vec<Vec<Inline>> = Vec::new();

        for line in markdown.lines() {
            let trimmed = line.trim();
            if let Some(caps) = LIST_ITEM_RE.captures(trimmed) {
                items.push(Self::parse_inline(&caps[1]));
                continue;
            }
            if !items.is_empty() {
                nodes.push(MarkdownNode::List(std::mem::take(&mut items)));
            }
            if trimmed.is_empty() {
                nodes.push(MarkdownNode::Break);
            } else {
                nodes.push(MarkdownNode::Paragraph(Self::parse_inline(trimmed)));
            }
        }
        if !items.is_empty() {
            nodes.push(MarkdownNode::List(items));
        }
        nodes
    }

    pub fn parse_inline(text: &str) -> Vec<Inline> {
        let mut spans = Vec::new();
        let mut last = 0;
        for caps in INLINE_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                spans.push(Inline::Text(text[last..whole.start()].to_string()));
            }
            if let Some(strong) = caps.get(1) {
                spans.push(Inline::Strong(strong.as_str().to_string()));
            } else if let Some(code) = caps.get(2) {
                spans.push(Inline::Code(code.as_str().to_string()));
            }
            last = whole.end();
        }
        if last < text.len() {
            spans.push(Inline::Text(text[last..].to_string()));
        }
        spans
    }
}
