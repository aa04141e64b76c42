use std::time::Duration;

use async_trait::async_trait;
use object_store::{
    aws::{AmazonS3, AmazonS3Builder},
    path::Path,
    Attribute, Attributes, ClientOptions, ObjectStore, PutOptions, PutPayload,
};

use crate::{public_object_url, HeadObjectResponse, ObjectsStore, StoreError};

#[derive(Debug, Clone)]
pub struct S3StoreConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// S3-compatible endpoint used instead of AWS, e.g. a MinIO server.
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct S3ObjectsStore {
    bucket: String,
    region: String,
    s3: AmazonS3,
}

impl S3ObjectsStore {
    pub fn new(config: S3StoreConfig) -> Result<Self, StoreError> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .with_client_options(ClientOptions::new().with_timeout(config.timeout));
        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }
        let s3 = builder.build().map_err(StoreError::Config)?;
        Ok(Self {
            bucket: config.bucket,
            region: config.region,
            s3,
        })
    }
}

#[async_trait]
impl ObjectsStore for S3ObjectsStore {
    async fn head_object(&self, key: &str) -> Result<HeadObjectResponse, StoreError> {
        match self.s3.head(&Path::from(key)).await {
            Ok(_) => Ok(HeadObjectResponse::Found),
            Err(object_store::Error::NotFound { .. }) => Ok(HeadObjectResponse::NotFound),
            Err(e) => {
                log::error!("error checking existence of {} in S3: {}", key, e);
                Err(StoreError::Head {
                    key: key.to_string(),
                    source: e,
                })
            }
        }
    }

    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut attributes = Attributes::new();
        if let Some(content_type) = content_type {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };
        self.s3
            .put_opts(&Path::from(key), PutPayload::from(data), opts)
            .await
            .map_err(|e| StoreError::Put {
                key: key.to_string(),
                source: e,
            })?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, key)
    }
}
