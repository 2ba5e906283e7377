use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target of a `link` mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

/// A style annotation on a `text` node.
///
/// Serialized as `{"type": "bold"}` or `{"type": "link", "attrs": {"href": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
    Link { attrs: LinkAttrs },
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs { href: href.into() },
        }
    }

    /// Lenient decoding from external JSON.
    ///
    /// Accepts `strikethrough`/`strong`/`em` aliases and a bare `href` next to
    /// the tag. Anything unrecognised yields `None` so the mark is dropped.
    pub fn from_value(value: &Value) -> Option<Mark> {
        let tag = match value {
            Value::String(s) => s.as_str(),
            Value::Object(map) => map.get("type")?.as_str()?,
            _ => return None,
        };
        match tag {
            "bold" | "strong" => Some(Mark::Bold),
            "italic" | "em" => Some(Mark::Italic),
            "strike" | "strikethrough" => Some(Mark::Strike),
            "code" => Some(Mark::Code),
            "link" => {
                let href = value
                    .pointer("/attrs/href")
                    .or_else(|| value.get("href"))
                    .and_then(Value::as_str)?;
                Some(Mark::link(href))
            }
            _ => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            Mark::Link { attrs } => Some(&attrs.href),
            _ => None,
        }
    }
}
