use std::time::Duration;

use async_trait::async_trait;
use blockmirror_common::error::FetchError;

use crate::{types::ListChildBlocksResponse, DocumentService, MAX_PAGE_SIZE};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone)]
pub struct NotionClient {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl NotionClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Self {
        let mut base_url = base_url;
        if base_url.ends_with('/') {
            base_url.pop();
        }
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url,
            token,
            agent,
        }
    }

    fn list_child_blocks_blocking(
        &self,
        block_id: &str,
        page_size: u32,
    ) -> Result<ListChildBlocksResponse, FetchError> {
        if !is_valid_block_id(block_id) {
            return Err(FetchError::InvalidBlockId {
                block_id: block_id.to_string(),
            });
        }
        let url = format!("{}/blocks/{}/children", self.base_url, block_id);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        let list_res: ListChildBlocksResponse = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", NOTION_VERSION)
            .query("page_size", &page_size)
            .call()
            .map_err(|e| FetchError::from_ureq(&url, e))?
            .into_json()
            .map_err(|e| FetchError::Read {
                url: url.clone(),
                source: e,
            })?;
        log::debug!(
            "listed {} child blocks of {}",
            list_res.results.len(),
            block_id
        );
        Ok(list_res)
    }
}

/// Block ids are UUIDs, with or without dashes. Anything else could change
/// the path or query of the request that carries the token.
pub fn is_valid_block_id(block_id: &str) -> bool {
    !block_id.is_empty() && block_id.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

#[async_trait]
impl DocumentService for NotionClient {
    async fn list_child_blocks(
        &self,
        block_id: &str,
        page_size: u32,
    ) -> Result<ListChildBlocksResponse, FetchError> {
        let client = self.clone();
        let block_id = block_id.to_string();
        tokio::task::spawn_blocking(move || client.list_child_blocks_blocking(&block_id, page_size))
            .await
            .map_err(|e| FetchError::Worker(e.to_string()))?
    }
}
