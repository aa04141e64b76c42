use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const IMAGE_BLOCK_TYPE: &str = "image";

/// Key under which the mirrored URL is attached to an image payload.
pub const STORE_URL_FIELD: &str = "s3Url";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub content: Option<Value>,
    pub has_children: bool,
}

impl Block {
    pub fn is_image(&self) -> bool {
        self.block_type == IMAGE_BLOCK_TYPE
    }

    pub fn store_url(&self) -> Option<&str> {
        self.content.as_ref()?.get(STORE_URL_FIELD)?.as_str()
    }
}

pub type V1PageBlocksResponse = Vec<Block>;
