use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Attrs, Document, Node, NodeKind};
use crate::render::markdown::placeholder_label;

/// Lightweight description of one top-level block, for reporting and for
/// matching string targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub preview: String,
    /// Scalar attributes only; nested payloads are left out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

/// Summaries of every top-level block.
pub fn summarize(doc: &Document, preview_chars: usize) -> Vec<BlockSummary> {
    doc.content
        .iter()
        .enumerate()
        .map(|(index, node)| BlockSummary {
            index,
            kind: node.kind,
            preview: preview(node, preview_chars),
            attrs: scalar_attrs(node),
        })
        .collect()
}

/// Short text identifying a block: its text with whitespace collapsed, cut
/// to `max_chars` characters. Blocks without text get a bracketed label.
pub fn preview(node: &Node, max_chars: usize) -> String {
    match node.kind {
        kind if kind.is_opaque() || kind.is_reference() => placeholder_label(node),
        NodeKind::Image => {
            let name = node
                .attr_str("alt")
                .filter(|a| !a.is_empty())
                .or_else(|| node.attr_str("src"))
                .unwrap_or_default();
            format!("[{}: {name}]", node.kind.label())
        }
        NodeKind::HorizontalRule => format!("[{}]", node.kind.label()),
        _ => node
            .plain_text()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(max_chars)
            .collect(),
    }
}

fn scalar_attrs(node: &Node) -> Option<Attrs> {
    let attrs: Attrs = node
        .attrs
        .iter()
        .filter(|(_, v)| matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    (!attrs.is_empty()).then_some(attrs)
}
