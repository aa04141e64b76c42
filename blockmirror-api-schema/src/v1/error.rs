use serde::{Deserialize, Serialize};

pub const FETCH_ERROR_CODE: &str = "fetch_error";
pub const STORE_ERROR_CODE: &str = "store_error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct V1ErrorResponse {
    pub code: String,
    pub message: String,
}
