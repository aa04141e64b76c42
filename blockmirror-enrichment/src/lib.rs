use std::sync::Arc;

use blockmirror_api_schema::v1::{
    error::{FETCH_ERROR_CODE, STORE_ERROR_CODE},
    page_blocks::{Block, IMAGE_BLOCK_TYPE, STORE_URL_FIELD},
};
use blockmirror_common::error::FetchError;
use blockmirror_document_client::{
    types::{ImagePayload, RawBlock},
    DocumentService, MAX_PAGE_SIZE,
};
use blockmirror_objects_store::StoreError;
use blockmirror_uploader::{ContentAddressedUploader, UploadError};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EnrichError {
    pub fn code(&self) -> &'static str {
        match self {
            EnrichError::Fetch(_) => FETCH_ERROR_CODE,
            EnrichError::Store(_) => STORE_ERROR_CODE,
        }
    }
}

impl From<UploadError> for EnrichError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Fetch(e) => EnrichError::Fetch(e),
            UploadError::Store(e) => EnrichError::Store(e),
        }
    }
}

pub struct BlockEnrichmentPipeline {
    documents: Arc<dyn DocumentService>,
    uploader: Arc<ContentAddressedUploader>,
}

impl BlockEnrichmentPipeline {
    pub fn new(
        documents: Arc<dyn DocumentService>,
        uploader: Arc<ContentAddressedUploader>,
    ) -> Self {
        Self {
            documents,
            uploader,
        }
    }

    /// Lists the first page of children of `page_id` and mirrors every
    /// image among them. Fails as a whole if any image fails.
    pub async fn get_enriched_blocks(&self, page_id: &str) -> Result<Vec<Block>, EnrichError> {
        let list_res = self
            .documents
            .list_child_blocks(page_id, MAX_PAGE_SIZE)
            .await?;
        if list_res.has_more {
            log::warn!(
                "page {} has more than {} child blocks, only the first page is returned",
                page_id,
                MAX_PAGE_SIZE
            );
        }

        let mut blocks = Vec::with_capacity(list_res.results.len());
        for raw in &list_res.results {
            let mut block = map_block(raw);
            if block.block_type == IMAGE_BLOCK_TYPE {
                let source_url = image_source_url(raw)?;
                let store_url = self.uploader.store_image(&source_url).await?;
                attach_store_url(&mut block, raw, store_url);
            }
            blocks.push(block);
        }
        Ok(blocks)
    }
}

fn map_block(raw: &RawBlock) -> Block {
    Block {
        id: raw.id.clone(),
        block_type: raw.block_type.clone(),
        content: raw.content(),
        has_children: raw.has_children,
    }
}

fn image_source_url(raw: &RawBlock) -> Result<String, FetchError> {
    let malformed = |reason: String| FetchError::MalformedBlock {
        block_id: raw.id.clone(),
        reason,
    };
    let payload = raw
        .payload()
        .ok_or_else(|| malformed("missing image payload".to_string()))?;
    let image: ImagePayload =
        serde_json::from_value(payload.clone()).map_err(|e| malformed(e.to_string()))?;
    image
        .source_url()
        .map(str::to_string)
        .ok_or_else(|| malformed(format!("no url for image source {}", image.source_type)))
}

/// Adds `s3Url` to the image payload. When `content` holds the payload's
/// `text` instead, it is replaced by the whole payload, which keeps `text`.
fn attach_store_url(block: &mut Block, raw: &RawBlock, store_url: String) {
    let mut payload = match block.content.take() {
        Some(Value::Object(payload)) => payload,
        _ => match raw.payload() {
            Some(Value::Object(payload)) => payload.clone(),
            _ => serde_json::Map::new(),
        },
    };
    payload.insert(STORE_URL_FIELD.to_string(), Value::String(store_url));
    block.content = Some(Value::Object(payload));
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use blockmirror_document_client::types::ListChildBlocksResponse;
    use blockmirror_objects_store::memory_store::MemoryObjectsStore;
    use blockmirror_uploader::image_source::{FetchedImage, ImageSource};
    use serde_json::json;

    use super::*;

    struct StaticDocuments {
        response: Option<Value>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentService for StaticDocuments {
        async fn list_child_blocks(
            &self,
            block_id: &str,
            page_size: u32,
        ) -> Result<ListChildBlocksResponse, FetchError> {
            assert_eq!(page_size, MAX_PAGE_SIZE);
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Some(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
                None => Err(FetchError::Status {
                    url: format!("https://api.notion.com/v1/blocks/{}/children", block_id),
                    status: 502,
                    body: "bad gateway".to_string(),
                }),
            }
        }
    }

    struct EchoImageSource;

    #[async_trait]
    impl ImageSource for EchoImageSource {
        async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
            if url.contains("broken") {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                    body: String::new(),
                });
            }
            Ok(FetchedImage {
                data: url.as_bytes().to_vec(),
                content_type: Some("image/png".to_string()),
            })
        }
    }

    fn pipeline(
        response: Option<Value>,
    ) -> (BlockEnrichmentPipeline, Arc<StaticDocuments>, Arc<MemoryObjectsStore>) {
        let documents = Arc::new(StaticDocuments {
            response,
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(MemoryObjectsStore::new("bucket", "us-east-1"));
        let uploader = Arc::new(ContentAddressedUploader::new(
            Arc::new(EchoImageSource),
            store.clone(),
        ));
        (
            BlockEnrichmentPipeline::new(documents.clone(), uploader),
            documents,
            store,
        )
    }

    fn page(results: Value) -> Option<Value> {
        Some(json!({"object": "list", "results": results, "next_cursor": null, "has_more": false}))
    }

    #[tokio::test]
    async fn test_enriches_images_and_keeps_order() {
        let (pipeline, _, store) = pipeline(page(json!([
            {"id": "b1", "type": "paragraph", "has_children": false,
             "paragraph": {"text": [{"plain_text": "hello"}]}},
            {"id": "b2", "type": "image", "has_children": false,
             "image": {"type": "external", "external": {"url": "http://x/a.png"}}},
            {"id": "b3", "type": "toggle", "has_children": true,
             "toggle": {"rich_text": []}},
            {"id": "b4", "type": "image", "has_children": false,
             "image": {"type": "file", "file": {"url": "https://files.example/b.png"}}}
        ])));

        let blocks = pipeline.get_enriched_blocks("page-1").await.unwrap();

        let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3", "b4"]);

        assert_eq!(blocks[0].content, Some(json!([{"plain_text": "hello"}])));
        assert_eq!(blocks[0].store_url(), None);
        assert_eq!(blocks[2].content, Some(json!({"rich_text": []})));
        assert!(blocks[2].has_children);

        for image in [&blocks[1], &blocks[3]] {
            let url = image.store_url().unwrap();
            assert!(url.starts_with("https://bucket.s3.us-east-1.amazonaws.com/"));
            assert!(url.ends_with(".jpg"));
        }
        assert_eq!(
            blocks[1].content.as_ref().unwrap()["external"]["url"],
            json!("http://x/a.png")
        );
        assert_eq!(store.put_calls(), 2);
    }

    #[tokio::test]
    async fn test_image_caption_text_is_kept() {
        let (pipeline, _, _) = pipeline(page(json!([
            {"id": "b1", "type": "image", "has_children": false,
             "image": {"type": "external", "external": {"url": "http://x/a.png"},
                       "text": [{"plain_text": "cap"}]}}
        ])));

        let blocks = pipeline.get_enriched_blocks("page-1").await.unwrap();

        let content = blocks[0].content.as_ref().unwrap();
        assert_eq!(content["text"], json!([{"plain_text": "cap"}]));
        assert_eq!(content["external"]["url"], json!("http://x/a.png"));
        assert!(blocks[0].store_url().is_some());
    }

    #[tokio::test]
    async fn test_non_image_blocks_pass_through() {
        let raw = json!({"id": "b1", "type": "heading_1", "has_children": false,
                         "heading_1": {"rich_text": [{"plain_text": "Title"}]}});
        let (pipeline, _, store) = pipeline(page(json!([raw.clone()])));

        let blocks = pipeline.get_enriched_blocks("page-1").await.unwrap();

        let expected = Block {
            id: "b1".to_string(),
            block_type: "heading_1".to_string(),
            content: Some(json!({"rich_text": [{"plain_text": "Title"}]})),
            has_children: false,
        };
        assert_eq!(blocks, vec![expected]);
        assert_eq!(store.head_calls(), 0);
    }

    #[tokio::test]
    async fn test_document_failure_uploads_nothing() {
        let (pipeline, documents, store) = pipeline(None);

        let err = pipeline.get_enriched_blocks("page-1").await.unwrap_err();

        assert_eq!(err.code(), FETCH_ERROR_CODE);
        assert_eq!(documents.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.head_calls(), 0);
        assert_eq!(store.put_calls(), 0);
    }

    #[tokio::test]
    async fn test_one_failing_image_fails_the_page() {
        let (pipeline, _, store) = pipeline(page(json!([
            {"id": "b1", "type": "image",
             "image": {"type": "external", "external": {"url": "http://x/a.png"}}},
            {"id": "b2", "type": "image",
             "image": {"type": "external", "external": {"url": "http://x/broken.png"}}}
        ])));

        let err = pipeline.get_enriched_blocks("page-1").await.unwrap_err();

        assert!(matches!(err, EnrichError::Fetch(FetchError::Status { status: 404, .. })));
        assert_eq!(store.put_calls(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_store_code() {
        let (pipeline, _, store) = pipeline(page(json!([
            {"id": "b1", "type": "image",
             "image": {"type": "external", "external": {"url": "http://x/a.png"}}}
        ])));
        store.set_unavailable(true);

        let err = pipeline.get_enriched_blocks("page-1").await.unwrap_err();

        assert_eq!(err.code(), STORE_ERROR_CODE);
    }

    #[tokio::test]
    async fn test_image_without_url_is_malformed() {
        let (pipeline, _, _) = pipeline(page(json!([
            {"id": "b1", "type": "image", "image": {"type": "file"}}
        ])));

        let err = pipeline.get_enriched_blocks("page-1").await.unwrap_err();

        match err {
            EnrichError::Fetch(FetchError::MalformedBlock { block_id, .. }) => {
                assert_eq!(block_id, "b1")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_truncated_listing_still_returns_first_page() {
        let (pipeline, _, _) = pipeline(Some(json!({
            "results": [{"id": "b1", "type": "divider", "divider": {}}],
            "next_cursor": "cursor-2",
            "has_more": true
        })));

        let blocks = pipeline.get_enriched_blocks("page-1").await.unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, Some(json!({})));
    }
}
