/// Data structures for Tab Shelf
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A saved tab owned by the remote record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl TabRecord {
    pub fn new(id: String, url: String, title: String) -> TabRecord {
        TabRecord {
            id,
            url,
            title,
            archived: false,
            deleted: false,
        }
    }
}

/// A partial record as returned by the store after a mutation. Everything
/// besides the id stays schemaless until it is merged into the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDelta {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RecordDelta {
    /// The delta as a plain JSON object, id included
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }
}

/// The only record fields this extension ever patches
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl RecordPatch {
    pub fn archived(value: bool) -> RecordPatch {
        RecordPatch {
            archived: Some(value),
            ..RecordPatch::default()
        }
    }

    pub fn deleted(value: bool) -> RecordPatch {
        RecordPatch {
            deleted: Some(value),
            ..RecordPatch::default()
        }
    }
}

/// Mutation request body sent to the record store
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub ids: Vec<String>,
    pub update: RecordPatch,
}

/// A live tab as reported by the host browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenTab {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    pub index: i32,
    #[serde(rename = "windowId")]
    pub window_id: i32,
}
