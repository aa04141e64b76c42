use std::sync::Arc;

use blockmirror_document_client::notion::NotionClient;
use blockmirror_enrichment::BlockEnrichmentPipeline;
use blockmirror_objects_store::{
    s3_store::{S3ObjectsStore, S3StoreConfig},
    StoreError,
};
use blockmirror_uploader::{
    fingerprint_cache::FingerprintCache, image_source::HttpImageSource, ContentAddressedUploader,
};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<BlockEnrichmentPipeline>,
}

impl ApiState {
    pub fn new(pipeline: BlockEnrichmentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Wires the Notion client, the HTTP image source and S3.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StoreError> {
        let documents = NotionClient::new(
            config.notion_base_url.clone(),
            config.notion_token.clone(),
            config.http_timeout,
        );
        let store = S3ObjectsStore::new(S3StoreConfig {
            bucket: config.s3_bucket_name.clone(),
            region: config.aws_region.clone(),
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
            endpoint: config.s3_endpoint.clone(),
            timeout: config.http_timeout,
        })?;
        let source = HttpImageSource::new(config.http_timeout, config.max_image_bytes);
        let uploader = ContentAddressedUploader::new(Arc::new(source), Arc::new(store))
            .with_naming(config.object_naming)
            .with_cache(FingerprintCache::new(config.fingerprint_cache_capacity));

        Ok(Self::new(BlockEnrichmentPipeline::new(
            Arc::new(documents),
            Arc::new(uploader),
        )))
    }
}
