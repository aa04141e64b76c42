use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListChildBlocksResponse {
    pub results: Vec<RawBlock>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A block as the document service returns it. The type-specific payload
/// sits under a key equal to `block_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawBlock {
    pub fn payload(&self) -> Option<&Value> {
        self.fields.get(&self.block_type).filter(|v| !v.is_null())
    }

    /// The payload's `text` field if set, else the payload itself.
    pub fn content(&self) -> Option<Value> {
        let payload = self.payload()?;
        match payload.get("text") {
            Some(text) if !text.is_null() => Some(text.clone()),
            _ => Some(payload.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

/// Payload of an `image` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub file: Option<FileUrl>,
    #[serde(default)]
    pub external: Option<FileUrl>,
}

impl ImagePayload {
    /// Provider-hosted `file.url` when tagged `file`, else `external.url`.
    pub fn source_url(&self) -> Option<&str> {
        let location = if self.source_type == "file" {
            self.file.as_ref()
        } else {
            self.external.as_ref()
        };
        location.map(|l| l.url.as_str())
    }
}
