use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What an [`EditOperation`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    InsertAfter,
    InsertBefore,
    Replace,
    Remove,
    Append,
}

impl EditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EditAction::InsertAfter => "insert_after",
            EditAction::InsertBefore => "insert_before",
            EditAction::Replace => "replace",
            EditAction::Remove => "remove",
            EditAction::Append => "append",
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level block address: an index, or text to look for in block
/// previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "WireTarget")]
pub enum Target {
    Index(i64),
    Text(String),
}

/// Accepted wire forms. Fractional indices such as `2.0` are truncated.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireTarget {
    Index(i64),
    Float(f64),
    Text(String),
}

impl From<WireTarget> for Target {
    fn from(wire: WireTarget) -> Self {
        match wire {
            WireTarget::Index(i) => Target::Index(i),
            WireTarget::Float(f) => Target::Index(f.trunc() as i64),
            WireTarget::Text(text) => Target::Text(text),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Index(i) => write!(f, "index {i}"),
            Target::Text(text) => write!(f, "\"{text}\""),
        }
    }
}

impl From<i64> for Target {
    fn from(index: i64) -> Self {
        Target::Index(index)
    }
}

impl From<i32> for Target {
    fn from(index: i32) -> Self {
        Target::Index(index.into())
    }
}

impl From<usize> for Target {
    fn from(index: usize) -> Self {
        Target::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Target {
    fn from(text: &str) -> Self {
        Target::Text(text.to_string())
    }
}

/// One edit: `{action, target?, end_target?, content?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditOperation {
    pub action: EditAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_target: Option<Target>,
    /// Anything the normalizer accepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl EditOperation {
    pub fn new(action: EditAction) -> Self {
        Self {
            action,
            target: None,
            end_target: None,
            content: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_end_target(mut self, end: impl Into<Target>) -> Self {
        self.end_target = Some(end.into());
        self
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }
}

/// Wire form of an edit request. `document_id` is for the caller's storage
/// layer and is not read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub operations: Vec<EditOperation>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid edit request: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditRequest {
    /// Decodes a request from JSON text. A bare array is accepted as the
    /// operation list.
    pub fn from_json(text: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(text)?;
        let request = match value {
            Value::Array(_) => EditRequest {
                document_id: None,
                operations: serde_json::from_value(value)?,
            },
            other => serde_json::from_value(other)?,
        };
        Ok(request)
    }
}
