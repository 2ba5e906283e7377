use serde_json::Value;

use crate::editing::{BlockSummary, EditOperation, EditOutcome, EditRequest, apply_edits, summarize};
use crate::model::{Document, IdGenerator, UuidIds};
use crate::normalize::{assign_block_ids, normalize_with};
use crate::options::EngineOptions;
use crate::parsing::parse_markdown_with;
use crate::render::{to_html_with, to_markdown_with};

/// Options and an ID source bound together, so callers do not thread them
/// through every call.
///
/// ```rust
/// use blockdoc_engine::ContentEngine;
/// use blockdoc_engine::model::SequentialIds;
///
/// let mut engine = ContentEngine::with_ids(SequentialIds::new("b"));
/// let doc = engine.parse_markdown("# Title\n\nSome **bold** text.");
/// assert_eq!(doc.content[0].block_id(), Some("b-1"));
/// assert_eq!(engine.to_markdown(&doc), "# Title\n\nSome **bold** text.");
/// ```
#[derive(Debug, Clone)]
pub struct ContentEngine<G: IdGenerator = UuidIds> {
    options: EngineOptions,
    ids: G,
}

impl ContentEngine<UuidIds> {
    pub fn new() -> Self {
        Self::with_ids(UuidIds)
    }
}

impl Default for ContentEngine<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> ContentEngine<G> {
    pub fn with_ids(ids: G) -> Self {
        Self {
            options: EngineOptions::default(),
            ids,
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Normalizes arbitrary input into a document with IDs.
    pub fn normalize(&mut self, input: &Value) -> Document {
        normalize_with(input, &self.options, &mut self.ids)
    }

    /// Parses Markdown into a document with IDs.
    pub fn parse_markdown(&mut self, text: &str) -> Document {
        let mut doc = Document::new(parse_markdown_with(text, &self.options));
        assign_block_ids(&mut doc.content, &mut self.ids);
        doc
    }

    pub fn to_markdown(&self, doc: &Document) -> String {
        to_markdown_with(doc, &self.options)
    }

    pub fn to_html(&self, doc: &Document) -> String {
        to_html_with(doc, &self.options)
    }

    pub fn structure(&self, doc: &Document) -> Vec<BlockSummary> {
        summarize(doc, self.options.preview_chars)
    }

    pub fn apply_edits(&mut self, doc: &Document, operations: &[EditOperation]) -> EditOutcome {
        apply_edits(doc, operations, &self.options, &mut self.ids)
    }

    /// Applies a decoded request. Its `document_id` is ignored.
    pub fn apply_request(&mut self, doc: &Document, request: &EditRequest) -> EditOutcome {
        self.apply_edits(doc, &request.operations)
    }
}
