//! # Content Normalizer
//!
//! Turns arbitrary external input into a canonical [`Document`].
//!
//! Input is a `serde_json::Value` and is classified in this order:
//!
//! 1. `null` is an empty document
//! 2. strings holding a JSON object or array are decoded and re-classified,
//!    any other string is parsed as Markdown
//! 3. arrays are simplified block JSON if any element uses the simplified
//!    vocabulary, otherwise raw canonical nodes
//! 4. a `doc` object is validated, a single block object is wrapped
//! 5. anything else becomes one paragraph of its JSON text
//!
//! Conversion never fails. Finished trees are settled within the nesting
//! limit, then block IDs are assigned with the caller's [`IdGenerator`].

pub mod depth;
pub mod ids;
pub mod placeholder;
pub mod raw;
pub mod simplified;

pub use depth::settle_depth;
pub use ids::assign_block_ids;

use serde_json::{Map, Value};

use crate::model::{Document, IdGenerator, Node, NodeKind};
use crate::options::EngineOptions;
use crate::parsing::blocks::BlockBuilder;
use crate::parsing::inline::parse_inline;

/// Normalizes input into a document with default options.
pub fn normalize(input: &Value, ids: &mut impl IdGenerator) -> Document {
    normalize_with(input, &EngineOptions::default(), ids)
}

pub fn normalize_with(input: &Value, options: &EngineOptions, ids: &mut impl IdGenerator) -> Document {
    Document::new(normalize_blocks(input, options, ids))
}

/// Converts input into top-level blocks with IDs assigned, without wrapping
/// them in a document. Used for edit operation payloads.
pub fn normalize_blocks(input: &Value, options: &EngineOptions, ids: &mut impl IdGenerator) -> Vec<Node> {
    let mut blocks = convert_value(input, Scope::new(options));
    settle_depth(&mut blocks, options.max_depth);
    assign_block_ids(&mut blocks, ids);
    blocks
}

/// Nesting position while converting. Every converter that descends into a
/// container passes [`Scope::deeper`] to its children.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    options: &'a EngineOptions,
    depth: usize,
}

impl<'a> Scope<'a> {
    pub fn new(options: &'a EngineOptions) -> Self {
        Self { options, depth: 0 }
    }

    pub fn deeper(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// Whether children of a container at this depth would exceed the limit.
    pub fn at_limit(self) -> bool {
        self.depth + 1 >= self.options.max_depth
    }

    /// Parses Markdown with whatever nesting budget is left.
    pub fn markdown(self, text: &str) -> Vec<Node> {
        let budget = self.options.max_depth.saturating_sub(self.depth).max(1);
        BlockBuilder::new(budget).parse(text)
    }
}

/// How an input array is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayShape {
    Simplified,
    Raw,
    Unknown,
}

impl ArrayShape {
    pub fn detect(items: &[Value]) -> Self {
        let tags = || items.iter().filter_map(type_tag);
        if tags().any(simplified::is_simplified_type) {
            ArrayShape::Simplified
        } else if tags().any(|tag| NodeKind::from_tag(tag).is_some()) {
            ArrayShape::Raw
        } else {
            ArrayShape::Unknown
        }
    }
}

pub(crate) fn type_tag(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

pub(crate) fn convert_value(value: &Value, scope: Scope<'_>) -> Vec<Node> {
    match value {
        Value::Null => vec![],
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ (Value::Object(_) | Value::Array(_))) => convert_value(&parsed, scope),
            _ => scope.markdown(s),
        },
        Value::Array(items) => convert_array(items, scope),
        Value::Object(obj) => convert_object(obj, value, scope),
        other => vec![literal_paragraph(&other.to_string())],
    }
}

fn convert_object(obj: &Map<String, Value>, value: &Value, scope: Scope<'_>) -> Vec<Node> {
    match obj.get("type").and_then(Value::as_str) {
        Some("doc") => match obj.get("content") {
            Some(Value::Array(content)) => raw::validate_blocks(content, scope),
            _ => vec![],
        },
        Some(tag) if simplified::is_simplified_type(tag) || NodeKind::from_tag(tag).is_some() => {
            convert_array(std::slice::from_ref(value), scope)
        }
        _ => match obj.get("text").and_then(Value::as_str) {
            Some(text) => vec![Node::paragraph(parse_inline(text))],
            None => vec![literal_paragraph(&value.to_string())],
        },
    }
}

pub(crate) fn convert_array(items: &[Value], scope: Scope<'_>) -> Vec<Node> {
    if scope.depth >= scope.options.max_depth {
        log::debug!("nesting limit reached, flattening {} elements", items.len());
        let text = items.iter().map(raw::flatten_text).collect::<Vec<_>>().join(" ");
        return if text.trim().is_empty() {
            vec![]
        } else {
            vec![literal_paragraph(&text)]
        };
    }

    let shape = ArrayShape::detect(items);
    log::debug!("normalizing {} elements as {shape:?}", items.len());
    items
        .iter()
        .flat_map(|item| match shape {
            ArrayShape::Raw => raw::validate_block(item, scope).into_iter().collect(),
            ArrayShape::Simplified | ArrayShape::Unknown => convert_element(item, scope),
        })
        .collect()
}

fn convert_element(item: &Value, scope: Scope<'_>) -> Vec<Node> {
    let obj = match item {
        Value::Object(obj) => obj,
        Value::String(s) => return scope.markdown(s),
        Value::Null => return vec![],
        other => return vec![literal_paragraph(&other.to_string())],
    };

    if simplified::is_canonical_shaped(obj) {
        return raw::validate_block(item, scope).into_iter().collect();
    }
    let tag = obj.get("type").and_then(Value::as_str).unwrap_or_default();
    if let Some(node) = simplified::convert(tag, obj, scope) {
        return vec![node];
    }
    match obj.get("text").and_then(Value::as_str) {
        Some(text) => vec![Node::paragraph(parse_inline(text))],
        None if NodeKind::from_tag(tag).is_some() => {
            raw::validate_block(item, scope).into_iter().collect()
        }
        None => {
            log::debug!("dropping unrecognized element of type {tag:?}");
            vec![]
        }
    }
}

/// A paragraph holding `text` verbatim, without inline parsing.
pub(crate) fn literal_paragraph(text: &str) -> Node {
    if text.is_empty() {
        Node::empty_paragraph()
    } else {
        Node::paragraph(vec![Node::text(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mark, SequentialIds};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn norm(input: Value) -> Document {
        normalize(&input, &mut SequentialIds::default())
    }

    fn kinds(doc: &Document) -> Vec<NodeKind> {
        doc.content.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn null_is_empty_document() {
        assert!(norm(Value::Null).is_empty());
    }

    #[test]
    fn markdown_string_is_parsed() {
        let doc = norm(json!("# Title\n\nSome **bold** text."));
        assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::Paragraph]);
        assert!(doc.content[1].content[1].has_mark(&Mark::Bold));
    }

    #[test]
    fn json_encoded_string_is_decoded() {
        let encoded = json!([{"type": "divider"}]).to_string();
        let doc = norm(Value::String(encoded));
        assert_eq!(kinds(&doc), vec![NodeKind::HorizontalRule]);
    }

    #[test]
    fn json_scalar_string_stays_markdown() {
        let doc = norm(json!("42"));
        assert_eq!(doc.content[0].plain_text(), "42");
    }

    #[rstest]
    #[case(json!(42), "42")]
    #[case(json!(true), "true")]
    #[case(json!({"foo": 1}), "{\"foo\":1}")]
    fn unclassifiable_input_is_stringified(#[case] input: Value, #[case] text: &str) {
        let doc = norm(input);
        assert_eq!(kinds(&doc), vec![NodeKind::Paragraph]);
        assert_eq!(doc.content[0].plain_text(), text);
    }

    #[test]
    fn simplified_list_becomes_bullet_list() {
        let doc = norm(json!([{"type": "list", "items": ["A", "B"]}]));
        let expected = Document::new(vec![Node::with_content(
            NodeKind::BulletList,
            vec![
                Node::with_content(NodeKind::ListItem, vec![Node::paragraph(vec![Node::text("A")])]),
                Node::with_content(NodeKind::ListItem, vec![Node::paragraph(vec![Node::text("B")])]),
            ],
        )]);
        assert_eq!(strip_ids(doc), expected);
    }

    #[test]
    fn doc_object_passes_through() {
        let doc = norm(json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": "hi"}]}]
        }));
        assert_eq!(doc.content[0].plain_text(), "hi");
    }

    #[test]
    fn single_block_object_is_wrapped() {
        let doc = norm(json!({"type": "heading", "level": 2, "text": "Done"}));
        assert_eq!(kinds(&doc), vec![NodeKind::Heading]);
        assert_eq!(doc.content[0].level(), 2);
    }

    #[test]
    fn canonical_shaped_element_in_simplified_array_is_validated() {
        let doc = norm(json!([
            {"type": "heading", "level": 1, "text": "Simple"},
            {"type": "paragraph", "content": [{"type": "text", "text": "raw", "marks": [{"type": "italic"}]}]}
        ]));
        assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::Paragraph]);
        assert!(doc.content[1].content[0].has_mark(&Mark::Italic));
    }

    #[test]
    fn unknown_elements_keep_text_or_drop() {
        let doc = norm(json!([
            {"type": "divider"},
            {"type": "callout", "text": "note"},
            {"type": "widget"}
        ]));
        assert_eq!(kinds(&doc), vec![NodeKind::HorizontalRule, NodeKind::Paragraph]);
        assert_eq!(doc.content[1].plain_text(), "note");
    }

    #[test]
    fn every_block_gets_an_id() {
        let doc = norm(json!("- a\n- b"));
        let mut missing = 0;
        doc.walk(|node| {
            if node.kind.is_identity_eligible() && node.block_id().is_none() {
                missing += 1;
            }
        });
        assert_eq!(missing, 0);
        assert_eq!(doc.content[0].block_id(), Some("block-1"));
    }

    #[test]
    fn deep_simplified_nesting_is_flattened() {
        let mut value = json!("leaf");
        for _ in 0..10 {
            value = json!([{"type": "columns", "columns": [value]}]);
        }
        let options = EngineOptions::default().with_max_depth(4);
        let doc = normalize_with(&value, &options, &mut SequentialIds::default());
        assert_eq!(kinds(&doc), vec![NodeKind::Columns]);
        assert!(doc.content[0].plain_text().contains("leaf"));
    }

    #[test]
    fn bare_canonical_leaf_in_simplified_array_is_kept() {
        let doc = norm(json!([
            {"type": "heading", "level": 1, "text": "A"},
            {"type": "horizontalRule"}
        ]));
        assert_eq!(kinds(&doc), vec![NodeKind::Heading, NodeKind::HorizontalRule]);
    }

    fn nested_accordions(levels: usize) -> Value {
        let mut value = json!("leaf");
        for _ in 0..levels {
            value = json!([{"type": "accordion", "items": [{"title": "T", "content": value}]}]);
        }
        value
    }

    #[test]
    fn nested_accordions_under_the_limit_render() {
        let doc = norm(nested_accordions(10));
        let markdown = crate::render::to_markdown(&doc);
        assert!(markdown.ends_with("**T**\n\nleaf"), "{markdown}");
        assert!(crate::render::to_html(&doc).contains("<p>leaf</p>"));
    }

    #[test]
    fn nested_accordions_past_the_limit_flatten_and_render() {
        let doc = norm(nested_accordions(11));
        let markdown = crate::render::to_markdown(&doc);
        assert_ne!(markdown, crate::render::CONVERSION_ERROR);
        assert!(markdown.ends_with("T leaf"), "{markdown}");
        assert!(crate::render::to_html(&doc).contains("<p>T leaf</p>"));
    }

    fn strip_ids(mut doc: Document) -> Document {
        fn strip(nodes: &mut [Node]) {
            for node in nodes {
                node.attrs.remove(crate::model::BLOCK_ID);
                strip(&mut node.content);
            }
        }
        strip(&mut doc.content);
        doc
    }
}
