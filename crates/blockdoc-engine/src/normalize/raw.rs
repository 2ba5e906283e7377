//! Validation of raw canonical nodes from untrusted JSON.
//!
//! Unknown types are dropped unless they carry `text`, marks survive only on
//! `text` nodes and only when well formed, leaves lose any children, and
//! empty containers get placeholder content.

use serde_json::Value;

use crate::model::{Mark, Node, NodeKind};
use crate::parsing::inline::parse_inline;

use super::{Scope, literal_paragraph, placeholder};

/// Keys whose string values are never document text.
const NON_TEXT_KEYS: [&str; 4] = ["type", "attrs", "marks", "language"];

pub fn validate_blocks(values: &[Value], scope: Scope<'_>) -> Vec<Node> {
    values
        .iter()
        .filter_map(|value| validate_block(value, scope))
        .collect()
}

/// Validates one node in block position. Bare text is lifted into a
/// paragraph.
pub fn validate_block(value: &Value, scope: Scope<'_>) -> Option<Node> {
    let node = validate(value, scope)?;
    Some(if node.kind == NodeKind::Text {
        Node::paragraph(vec![node])
    } else {
        node
    })
}

fn validate(value: &Value, scope: Scope<'_>) -> Option<Node> {
    let obj = value.as_object()?;
    let tag = obj.get("type").and_then(Value::as_str).unwrap_or_default();

    let Some(kind) = NodeKind::from_tag(tag) else {
        let text = obj.get("text").and_then(Value::as_str).filter(|t| !t.is_empty());
        match text {
            Some(text) => {
                log::debug!("unknown node type {tag:?} kept as paragraph");
                return Some(Node::paragraph(parse_inline(text)));
            }
            None => {
                log::debug!("dropping unknown node type {tag:?}");
                return None;
            }
        }
    };

    let mut node = Node::new(kind);
    if let Some(Value::Object(attrs)) = obj.get("attrs") {
        node.attrs = attrs.clone();
    }

    if kind == NodeKind::Text {
        let text = obj.get("text").and_then(Value::as_str).filter(|t| !t.is_empty())?;
        node.text = Some(text.to_string());
        node.marks = obj
            .get("marks")
            .and_then(Value::as_array)
            .map(|marks| marks.iter().filter_map(Mark::from_value).collect())
            .unwrap_or_default();
        return Some(node);
    }

    let children = obj
        .get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if kind.is_leaf() {
        if !children.is_empty() {
            log::debug!("dropping children of leaf {kind}");
        }
        return Some(node);
    }

    node.content = if scope.at_limit() {
        log::debug!("nesting limit reached inside {kind}, flattening");
        let text = children.iter().map(flatten_text).collect::<Vec<_>>().join(" ");
        match (text.trim().is_empty(), kind.is_textblock()) {
            (true, _) => vec![],
            (false, true) => vec![Node::text(text)],
            (false, false) => vec![placeholder::fit_child(kind, literal_paragraph(&text))],
        }
    } else if kind.is_textblock() {
        validate_inline(children, scope.deeper())
    } else {
        children
            .iter()
            .filter_map(|child| validate(child, scope.deeper()))
            .map(|child| placeholder::fit_child(kind, child))
            .collect()
    };

    placeholder::ensure_content(&mut node);
    Some(node)
}

/// Children of a textblock: text and inline references are kept, block
/// nodes are flattened into text runs.
fn validate_inline(children: &[Value], scope: Scope<'_>) -> Vec<Node> {
    let mut out = vec![];
    for child in children {
        let Some(node) = validate(child, scope) else {
            continue;
        };
        match node.kind {
            NodeKind::Text | NodeKind::TaskMention | NodeKind::TaskSection => out.push(node),
            NodeKind::Paragraph => out.extend(node.content),
            _ => {
                let text = node.plain_text();
                if !text.is_empty() {
                    out.push(Node::text(text));
                }
            }
        }
    }
    out
}

/// All document text inside a JSON value, joined with spaces. Iterative so
/// it is safe on input of any depth.
pub fn flatten_text(value: &Value) -> String {
    let mut parts = vec![];
    let mut stack = vec![value];
    while let Some(v) = stack.pop() {
        match v {
            Value::String(s) if !s.is_empty() => parts.push(s.as_str()),
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(obj) => stack.extend(
                obj.iter()
                    .filter(|(key, _)| !NON_TEXT_KEYS.contains(&key.as_str()))
                    .map(|(_, v)| v)
                    .rev(),
            ),
            _ => {}
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EngineOptions;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(value: Value) -> Option<Node> {
        validate_block(&value, Scope::new(&EngineOptions::default()))
    }

    #[test]
    fn keeps_valid_nodes_and_attrs() {
        let node = check(json!({
            "type": "heading",
            "attrs": {"level": 3, "blockId": "h1"},
            "content": [{"type": "text", "text": "Hi", "marks": [{"type": "bold"}]}]
        }))
        .unwrap();
        assert_eq!(node.level(), 3);
        assert_eq!(node.block_id(), Some("h1"));
        assert_eq!(node.content, vec![Node::marked_text("Hi", Mark::Bold)]);
    }

    #[test]
    fn strips_marks_from_non_text_and_bad_marks_from_text() {
        let node = check(json!({
            "type": "paragraph",
            "marks": [{"type": "bold"}],
            "content": [{"type": "text", "text": "x", "marks": [{"type": "sparkle"}, {"type": "code"}]}]
        }))
        .unwrap();
        assert!(node.marks.is_empty());
        assert_eq!(node.content[0].marks, vec![Mark::Code]);
    }

    #[test]
    fn unknown_types_fall_back_to_text_or_vanish() {
        let kept = check(json!({"type": "callout", "text": "note"})).unwrap();
        assert_eq!(kept.kind, NodeKind::Paragraph);
        assert_eq!(kept.plain_text(), "note");
        assert_eq!(check(json!({"type": "widget"})), None);
    }

    #[test]
    fn opaque_attrs_are_untouched() {
        let value = json!({
            "type": "spreadsheet",
            "attrs": {"spreadsheetId": "s1", "data": [[1, 2]]},
            "content": [{"type": "paragraph"}]
        });
        let node = check(value).unwrap();
        assert_eq!(node.attr("data"), Some(&json!([[1, 2]])));
        assert!(node.content.is_empty());
    }

    #[test]
    fn empty_list_gets_placeholder_item() {
        let node = check(json!({"type": "bulletList", "content": []})).unwrap();
        assert_eq!(node.content[0].kind, NodeKind::ListItem);
        assert_eq!(node.content[0].content, vec![Node::empty_paragraph()]);
    }

    #[test]
    fn nested_blocks_inside_paragraph_become_text() {
        let node = check(json!({
            "type": "paragraph",
            "content": [
                {"type": "text", "text": "a "},
                {"type": "heading", "content": [{"type": "text", "text": "b"}]}
            ]
        }))
        .unwrap();
        assert_eq!(node.content, vec![Node::text("a "), Node::text("b")]);
    }

    #[test]
    fn flatten_text_skips_structural_keys() {
        let value = json!({"type": "x", "content": [{"type": "text", "text": "one"}, "two"]});
        assert_eq!(flatten_text(&value), "one two");
    }
}
