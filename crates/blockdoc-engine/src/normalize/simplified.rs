//! Converters for the simplified block vocabulary.
//!
//! Simplified blocks are flat `{type, ...fields}` objects that are easy to
//! author by hand or by an agent, e.g. `{"type": "list", "items": ["A", "B"]}`.
//! Each converter produces one canonical node.

use serde_json::{Map, Value};

use crate::model::{Node, NodeKind};
use crate::parsing::inline::parse_inline;

use super::{Scope, convert_array, convert_value, literal_paragraph, placeholder::ensure_content};

type Object = Map<String, Value>;

/// Type tags of the simplified vocabulary.
pub const SIMPLIFIED_TYPES: [&str; 12] = [
    "heading",
    "paragraph",
    "list",
    "ordered_list",
    "checklist",
    "quote",
    "code",
    "divider",
    "table",
    "image",
    "accordion",
    "columns",
];

/// Fields that only simplified blocks carry at the top level.
const PAYLOAD_FIELDS: [&str; 12] = [
    "text", "items", "headers", "rows", "code", "columns", "src", "url", "level", "language",
    "title", "alt",
];

pub fn is_simplified_type(tag: &str) -> bool {
    SIMPLIFIED_TYPES.contains(&tag)
}

/// A canonical type tag with canonical fields (`attrs` or a `content` array)
/// and none of the simplified payload fields. Such elements are validated as
/// raw nodes even inside a simplified array.
pub fn is_canonical_shaped(obj: &Object) -> bool {
    let canonical = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(NodeKind::from_tag)
        .is_some();
    let has_canonical_fields = obj.get("attrs").is_some_and(Value::is_object)
        || obj.get("content").is_some_and(Value::is_array);
    canonical && has_canonical_fields && !PAYLOAD_FIELDS.iter().any(|f| obj.contains_key(*f))
}

/// Converts one simplified block. `None` when the tag is not simplified or
/// a required field is missing.
pub fn convert(tag: &str, obj: &Object, scope: Scope<'_>) -> Option<Node> {
    let node = match tag {
        "heading" => heading(obj),
        "paragraph" => Node::paragraph(parse_inline(&text_field(obj))),
        "list" => list(NodeKind::BulletList, items(obj), scope),
        "ordered_list" => {
            let node = list(NodeKind::OrderedList, items(obj), scope);
            match obj.get("start").and_then(Value::as_u64).filter(|&n| n != 1) {
                Some(start) => node.with_attr("start", start),
                None => node,
            }
        }
        "checklist" => list(NodeKind::TaskList, items(obj), scope),
        "quote" => quote(obj, scope),
        "code" => code(obj),
        "divider" => Node::new(NodeKind::HorizontalRule),
        "table" => table(obj),
        "image" => image(obj)?,
        "accordion" => accordion(obj, scope),
        "columns" => columns(obj, scope),
        _ => return None,
    };
    Some(node)
}

/// `text`, or a string `content`, as a string. Numbers and booleans are
/// accepted and printed.
fn text_field(obj: &Object) -> String {
    obj.get("text")
        .or_else(|| obj.get("content"))
        .and_then(scalar)
        .unwrap_or_default()
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn str_field<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "x" | "yes"),
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}

fn items(obj: &Object) -> &[Value] {
    obj.get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn heading(obj: &Object) -> Node {
    let level = obj
        .get("level")
        .and_then(|v| v.as_u64().or_else(|| v.as_str()?.trim().parse().ok()))
        .unwrap_or(1)
        .clamp(1, 6) as u8;
    Node::heading(level, parse_inline(&text_field(obj)))
}

/// Bullet, ordered and task lists. Items are strings or
/// `{text, checked?, items?}`; nested `items` become a sub-list of the same
/// kind inside the item.
fn list(kind: NodeKind, entries: &[Value], scope: Scope<'_>) -> Node {
    let mut node = Node::with_content(
        kind,
        entries
            .iter()
            .filter_map(|entry| list_entry(kind, entry, scope))
            .collect(),
    );
    ensure_content(&mut node);
    node
}

fn list_entry(kind: NodeKind, entry: &Value, scope: Scope<'_>) -> Option<Node> {
    let (text, checked, nested) = match entry {
        Value::Object(obj) => (
            text_field(obj),
            obj.get("checked").is_some_and(truthy),
            items(obj),
        ),
        other => (scalar(other)?, false, &[][..]),
    };

    let mut content = vec![Node::paragraph(parse_inline(&text))];
    if !nested.is_empty() {
        if scope.at_limit() {
            let text = nested.iter().map(super::raw::flatten_text).collect::<Vec<_>>().join(" ");
            content.push(literal_paragraph(&text));
        } else {
            content.push(list(kind, nested, scope.deeper()));
        }
    }

    Some(if kind == NodeKind::TaskList {
        Node::with_content(NodeKind::TaskItem, content).with_attr("checked", checked)
    } else {
        Node::with_content(NodeKind::ListItem, content)
    })
}

/// The quote's text is Markdown, so quotes may hold lists, code and so on.
fn quote(obj: &Object, scope: Scope<'_>) -> Node {
    let mut node = Node::with_content(
        NodeKind::Blockquote,
        scope.deeper().markdown(&text_field(obj)),
    );
    ensure_content(&mut node);
    node
}

fn code(obj: &Object) -> Node {
    let code = obj
        .get("code")
        .or_else(|| obj.get("text"))
        .and_then(scalar)
        .unwrap_or_default();
    Node::code_block(str_field(obj, "language"), &code)
}

/// `{headers: [...], rows: [[...], ...]}`. Rows are padded to the widest
/// row; a missing `headers` yields a table of data rows only.
fn table(obj: &Object) -> Node {
    let cell_text = |v: &Value| scalar(v).unwrap_or_default();
    let headers: Vec<String> = obj
        .get("headers")
        .and_then(Value::as_array)
        .map(|h| h.iter().map(cell_text).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = obj
        .get("rows")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| match row {
                    Value::Array(cells) => cells.iter().map(cell_text).collect(),
                    other => vec![cell_text(other)],
                })
                .collect()
        })
        .unwrap_or_default();

    let width = rows
        .iter()
        .map(Vec::len)
        .chain([headers.len()])
        .max()
        .unwrap_or(0);

    let mut table_rows = vec![];
    if !headers.is_empty() {
        table_rows.push(table_row(NodeKind::TableHeader, &headers, width));
    }
    table_rows.extend(rows.iter().map(|row| table_row(NodeKind::TableCell, row, width)));

    let mut node = Node::with_content(NodeKind::Table, table_rows);
    ensure_content(&mut node);
    node
}

fn table_row(cell_kind: NodeKind, cells: &[String], width: usize) -> Node {
    let cells = (0..width)
        .map(|i| {
            let text = cells.get(i).map_or("", String::as_str);
            Node::with_content(cell_kind, vec![Node::paragraph(parse_inline(text))])
        })
        .collect();
    let mut row = Node::with_content(NodeKind::TableRow, cells);
    ensure_content(&mut row);
    row
}

fn image(obj: &Object) -> Option<Node> {
    let Some(src) = str_field(obj, "src").or_else(|| str_field(obj, "url")) else {
        log::debug!("dropping image without src");
        return None;
    };
    Some(Node::image(src, str_field(obj, "alt"), str_field(obj, "title")))
}

/// `{items: [{title, content, icon?}]}` where `content` is Markdown or a
/// nested simplified array. Item, content and its blocks each sit one level
/// below the previous.
fn accordion(obj: &Object, scope: Scope<'_>) -> Node {
    let entries = items(obj)
        .iter()
        .filter_map(Value::as_object)
        .map(|item| accordion_item(item, scope.deeper()))
        .collect();
    let mut node = Node::with_content(NodeKind::AccordionGroup, entries);
    ensure_content(&mut node);
    node
}

fn accordion_item(item: &Object, scope: Scope<'_>) -> Node {
    let title = item.get("title").and_then(scalar).unwrap_or_default();
    let mut body = Node::with_content(
        NodeKind::AccordionContent,
        nested_content(item.get("content"), scope.deeper().deeper()),
    );
    ensure_content(&mut body);

    let node = Node::with_content(
        NodeKind::AccordionItem,
        vec![
            Node::with_content(NodeKind::AccordionTitle, parse_inline(&title)),
            body,
        ],
    );
    match str_field(item, "icon").filter(|i| !i.is_empty()) {
        Some(icon) => node.with_attr("icon", icon),
        None => node,
    }
}

/// `{columns: [...]}`; each column is Markdown, a simplified array, or
/// `{content, width?, backgroundColor?}`.
fn columns(obj: &Object, scope: Scope<'_>) -> Node {
    let cols = obj
        .get("columns")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut node = Node::with_content(
        NodeKind::Columns,
        cols.iter().map(|c| column(c, scope.deeper())).collect(),
    );
    ensure_content(&mut node);
    node
}

fn column(value: &Value, scope: Scope<'_>) -> Node {
    let (body, settings) = match value {
        Value::Object(obj) if !obj.contains_key("type") => (obj.get("content"), Some(obj)),
        other => (Some(other), None),
    };

    let mut node = Node::with_content(NodeKind::Column, nested_content(body, scope.deeper()));
    if let Some(settings) = settings {
        for key in ["width", "backgroundColor"] {
            if let Some(v) = settings.get(key).filter(|v| !v.is_null()) {
                node.attrs.insert(key.to_string(), v.clone());
            }
        }
    }
    ensure_content(&mut node);
    node
}

fn nested_content(value: Option<&Value>, scope: Scope<'_>) -> Vec<Node> {
    match value {
        None | Some(Value::Null) => vec![],
        Some(Value::String(s)) => scope.markdown(s),
        Some(Value::Array(items)) => convert_array(items, scope),
        Some(other) => convert_value(other, scope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;
    use crate::options::EngineOptions;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn convert_json(value: Value) -> Node {
        let options = EngineOptions::default();
        let obj = value.as_object().unwrap();
        let tag = obj["type"].as_str().unwrap();
        convert(tag, obj, Scope::new(&options)).unwrap()
    }

    fn para(text: &str) -> Node {
        Node::paragraph(vec![Node::text(text)])
    }

    #[test]
    fn heading_accepts_string_level_and_inline_marks() {
        let node = convert_json(json!({"type": "heading", "level": "2", "text": "A *b*"}));
        assert_eq!(
            node,
            Node::heading(2, vec![Node::text("A "), Node::marked_text("b", Mark::Italic)])
        );
    }

    #[test]
    fn nested_list_items() {
        let node = convert_json(json!({
            "type": "list",
            "items": ["one", {"text": "two", "items": ["two.a"]}]
        }));
        assert_eq!(node.content.len(), 2);
        let second = &node.content[1];
        assert_eq!(second.content[0], para("two"));
        assert_eq!(second.content[1].kind, NodeKind::BulletList);
        assert_eq!(second.content[1].plain_text(), "two.a");
    }

    #[test]
    fn ordered_list_start() {
        let node = convert_json(json!({"type": "ordered_list", "start": 3, "items": ["c"]}));
        assert_eq!(node.kind, NodeKind::OrderedList);
        assert_eq!(node.start(), 3);
    }

    #[test]
    fn checklist_items() {
        let node = convert_json(json!({
            "type": "checklist",
            "items": [{"text": "done", "checked": true}, "todo"]
        }));
        assert_eq!(node.kind, NodeKind::TaskList);
        assert!(node.content[0].checked());
        assert!(!node.content[1].checked());
        assert_eq!(node.content[1].kind, NodeKind::TaskItem);
    }

    #[test]
    fn empty_list_has_placeholder_item() {
        let node = convert_json(json!({"type": "list", "items": []}));
        assert_eq!(
            node.content,
            vec![Node::with_content(NodeKind::ListItem, vec![Node::empty_paragraph()])]
        );
    }

    #[test]
    fn quote_text_is_markdown() {
        let node = convert_json(json!({"type": "quote", "text": "line\n\n- item"}));
        let kinds: Vec<_> = node.content.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Paragraph, NodeKind::BulletList]);
    }

    #[test]
    fn code_block_from_code_or_text() {
        let node = convert_json(json!({"type": "code", "language": "sh", "code": "ls"}));
        assert_eq!(node, Node::code_block(Some("sh"), "ls"));
        let node = convert_json(json!({"type": "code", "text": "pwd"}));
        assert_eq!(node, Node::code_block(None, "pwd"));
    }

    #[test]
    fn table_header_and_padded_rows() {
        let node = convert_json(json!({
            "type": "table",
            "headers": ["Name", "Age"],
            "rows": [["Alice", 30], ["Bob"]]
        }));
        assert_eq!(node.content.len(), 3);
        assert_eq!(node.content[0].content[0].kind, NodeKind::TableHeader);
        assert_eq!(node.content[1].content[1].plain_text(), "30");
        assert_eq!(node.content[2].content.len(), 2);
        assert_eq!(node.content[2].content[1].content, vec![Node::empty_paragraph()]);
    }

    #[test]
    fn image_accepts_url_and_requires_a_source() {
        let node = convert_json(json!({"type": "image", "url": "/a.png", "alt": "A"}));
        assert_eq!(node, Node::image("/a.png", Some("A"), None));

        let options = EngineOptions::default();
        let obj = json!({"type": "image", "alt": "none"});
        assert_eq!(convert("image", obj.as_object().unwrap(), Scope::new(&options)), None);
    }

    #[test]
    fn accordion_with_markdown_and_nested_content() {
        let node = convert_json(json!({
            "type": "accordion",
            "items": [
                {"title": "FAQ", "content": "Answer **here**", "icon": "?"},
                {"title": "More", "content": [{"type": "divider"}]}
            ]
        }));
        assert_eq!(node.kind, NodeKind::AccordionGroup);
        let first = &node.content[0];
        assert_eq!(first.attr_str("icon"), Some("?"));
        assert_eq!(first.content[0].kind, NodeKind::AccordionTitle);
        assert_eq!(first.content[0].plain_text(), "FAQ");
        assert_eq!(first.content[1].kind, NodeKind::AccordionContent);
        assert_eq!(first.content[1].plain_text(), "Answer here");
        assert_eq!(
            node.content[1].content[1].content[0].kind,
            NodeKind::HorizontalRule
        );
    }

    #[test]
    fn columns_with_settings() {
        let node = convert_json(json!({
            "type": "columns",
            "columns": [
                "left",
                {"content": [{"type": "paragraph", "text": "right"}], "width": "30%", "backgroundColor": "#eee"}
            ]
        }));
        assert_eq!(node.content.len(), 2);
        assert_eq!(node.content[0].content, vec![para("left")]);
        assert_eq!(node.content[1].attr_str("width"), Some("30%"));
        assert_eq!(node.content[1].attr_str("backgroundColor"), Some("#eee"));
        assert_eq!(node.content[1].plain_text(), "right");
    }

    #[test]
    fn canonical_shape_detection() {
        let canonical = json!({"type": "paragraph", "content": []});
        let simplified = json!({"type": "paragraph", "text": "x"});
        let unknown = json!({"type": "list", "content": []});
        assert!(is_canonical_shaped(canonical.as_object().unwrap()));
        assert!(!is_canonical_shaped(simplified.as_object().unwrap()));
        assert!(!is_canonical_shaped(unknown.as_object().unwrap()));
    }
}
