use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadObjectResponse {
    Found,
    NotFound,
}

/// Failure of the object store. "Not found" on head is not an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("existence check of {key} failed: {source}")]
    Head {
        key: String,
        source: object_store::Error,
    },
    #[error("upload of {key} failed: {source}")]
    Put {
        key: String,
        source: object_store::Error,
    },
    #[error("failed to configure object store: {0}")]
    Config(object_store::Error),
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ObjectsStore: Send + Sync {
    async fn head_object(&self, key: &str) -> Result<HeadObjectResponse, StoreError>;

    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Deterministic public address of `key`. Performs no I/O.
    fn public_url(&self, key: &str) -> String;
}
