use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identifier as handed out by a store: sequential in memory, UUID v7 in SQLite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Seq(u64),
    Doc(Uuid),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Seq(id) => write!(f, "{id}"),
            NoteId::Doc(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub important: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NoteFilter {
    pub important: Option<bool>,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        self.important.map_or(true, |important| note.important == important)
    }
}

/// Body of `POST /api/notes`. Fields stay loosely typed so falsy values can be told apart from missing ones.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNote {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub important: Option<Value>,
}

/// Body of `PUT /api/notes/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ReplaceNote {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub important: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct NoteIdPath {
    pub id: String,
}

/// JavaScript truthiness: `false`, `0`, `""`, `null` and absent are false.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Content as text. Absent or falsy content is `None`; scalars are stringified.
pub fn content_text(value: Option<&Value>) -> std::result::Result<Option<String>, String> {
    if !truthy(value) {
        return Ok(None);
    }
    match value {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(format!(
            "Note validation failed: content: Cast to string failed for value `{other}`"
        )),
        None => Ok(None),
    }
}
