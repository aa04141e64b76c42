use std::sync::Arc;

use blockmirror_common::{error::FetchError, fingerprint::ContentFingerprint, naming::ObjectNaming};
use blockmirror_objects_store::{HeadObjectResponse, ObjectsStore, StoreError};

use crate::{fingerprint_cache::FingerprintCache, image_source::ImageSource};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Mirrors remote images into an object store under a key derived from
/// their content, writing each distinct content at most once.
pub struct ContentAddressedUploader {
    source: Arc<dyn ImageSource>,
    store: Arc<dyn ObjectsStore>,
    naming: ObjectNaming,
    cache: FingerprintCache,
}

impl ContentAddressedUploader {
    pub fn new(source: Arc<dyn ImageSource>, store: Arc<dyn ObjectsStore>) -> Self {
        Self {
            source,
            store,
            naming: ObjectNaming::default(),
            cache: FingerprintCache::disabled(),
        }
    }

    pub fn with_naming(mut self, naming: ObjectNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_cache(mut self, cache: FingerprintCache) -> Self {
        self.cache = cache;
        self
    }

    /// Returns the public URL of the stored copy of the image at `source_url`.
    pub async fn store_image(&self, source_url: &str) -> Result<String, UploadError> {
        let image = self.source.fetch(source_url).await?;
        let fingerprint = ContentFingerprint::from_bytes(&image.data);
        let key = self
            .naming
            .object_key(&fingerprint, image.content_type.as_deref());

        if let Some(url) = self.cache.get(&key) {
            log::debug!("fingerprint cache hit for {}: {}", source_url, url);
            return Ok(url);
        }

        let url = self.store.public_url(&key);
        match self.store.head_object(&key).await? {
            HeadObjectResponse::Found => {
                log::info!("file already exists in store: {}", url);
            }
            HeadObjectResponse::NotFound => {
                self.store
                    .put_object(&key, image.data, image.content_type.as_deref())
                    .await?;
                log::info!("image uploaded to store: {}", url);
            }
        }

        self.cache.insert(key, url.clone());
        Ok(url)
    }
}
