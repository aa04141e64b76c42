use async_trait::async_trait;
use blockmirror_common::error::FetchError;

pub mod notion;
pub mod types;

use types::ListChildBlocksResponse;

/// Largest page the document service hands out in one listing.
pub const MAX_PAGE_SIZE: u32 = 100;

#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Lists one page of the children of `block_id`. No cursor is followed.
    async fn list_child_blocks(
        &self,
        block_id: &str,
        page_size: u32,
    ) -> Result<ListChildBlocksResponse, FetchError>;
}
