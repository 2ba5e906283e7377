use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Mark, NodeKind};

/// Attribute bag carried by every node.
pub type Attrs = Map<String, Value>;

/// Key of the stable identifier in `attrs`.
pub const BLOCK_ID: &str = "blockId";

/// A node of the canonical block tree.
///
/// `text` and `marks` are only meaningful on [`NodeKind::Text`]; the
/// constructors below never put them anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
            content: Vec::new(),
            text: None,
            marks: Vec::new(),
        }
    }

    pub fn with_content(kind: NodeKind, content: Vec<Node>) -> Self {
        Self {
            content,
            ..Self::new(kind)
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(NodeKind::Text)
        }
    }

    pub fn marked_text(text: impl Into<String>, mark: Mark) -> Self {
        Self {
            marks: vec![mark],
            ..Self::text(text)
        }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Self::with_content(NodeKind::Paragraph, content)
    }

    /// A paragraph with no children, used as the placeholder for empty containers.
    pub fn empty_paragraph() -> Self {
        Self::new(NodeKind::Paragraph)
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Self::with_content(NodeKind::Heading, content).with_attr("level", level.clamp(1, 6))
    }

    pub fn code_block(language: Option<&str>, code: &str) -> Self {
        let content = if code.is_empty() {
            vec![]
        } else {
            vec![Node::text(code)]
        };
        let node = Self::with_content(NodeKind::CodeBlock, content);
        match language {
            Some(lang) if !lang.is_empty() => node.with_attr("language", lang),
            _ => node,
        }
    }

    pub fn image(src: &str, alt: Option<&str>, title: Option<&str>) -> Self {
        let mut node = Self::new(NodeKind::Image).with_attr("src", src);
        if let Some(alt) = alt {
            node = node.with_attr("alt", alt);
        }
        if let Some(title) = title {
            node = node.with_attr("title", title);
        }
        node
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Heading level, clamped to 1..=6. Defaults to 1.
    pub fn level(&self) -> u8 {
        self.attrs
            .get("level")
            .and_then(Value::as_u64)
            .map(|l| l.clamp(1, 6) as u8)
            .unwrap_or(1)
    }

    pub fn language(&self) -> Option<&str> {
        self.attr_str("language").filter(|l| !l.is_empty())
    }

    /// Task item state. Accepts booleans and the strings `"true"`/`"false"`.
    pub fn checked(&self) -> bool {
        match self.attrs.get("checked") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// First number of an ordered list. Defaults to 1.
    pub fn start(&self) -> u64 {
        self.attrs.get("start").and_then(Value::as_u64).unwrap_or(1)
    }

    pub fn block_id(&self) -> Option<&str> {
        self.attr_str(BLOCK_ID).filter(|id| !id.is_empty())
    }

    /// External identifier of an opaque or reference block.
    pub fn reference_id(&self) -> Option<String> {
        let key = self.kind.reference_attr()?;
        match self.attrs.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    /// Concatenated plain text of this node and its descendants.
    ///
    /// Sibling blocks are separated by a single space; inline runs are joined
    /// as-is.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
        return;
    }
    for child in &node.content {
        if child.kind != NodeKind::Text && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        collect_text(child, out);
    }
}

/// The root of a canonical tree: `{"type": "doc", "content": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    #[serde(default)]
    pub content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Depth-first walk over every node in document order.
    pub fn walk(&self, mut visit: impl FnMut(&Node)) {
        fn go(node: &Node, visit: &mut impl FnMut(&Node)) {
            visit(node);
            for child in &node.content {
                go(child, visit);
            }
        }
        for node in &self.content {
            go(node, &mut visit);
        }
    }
}
