pub mod blocks;
pub mod inline;

use crate::model::{Document, Node};
use crate::normalize::settle_depth;
use crate::options::EngineOptions;

use blocks::BlockBuilder;

/// Parses Markdown into top-level block nodes with default options.
pub fn parse_markdown(text: &str) -> Vec<Node> {
    parse_markdown_with(text, &EngineOptions::default())
}

pub fn parse_markdown_with(text: &str, options: &EngineOptions) -> Vec<Node> {
    let mut blocks = BlockBuilder::new(options.max_depth).parse(text);
    settle_depth(&mut blocks, options.max_depth);
    log::debug!("parsed {} top-level blocks from markdown", blocks.len());
    blocks
}

/// Parses Markdown into a document. Block IDs are not assigned here; that is
/// the normalizer's job.
pub fn parse_document(text: &str) -> Document {
    Document::new(parse_markdown(text))
}
