use std::{io::Read, time::Duration};

use async_trait::async_trait;
use blockmirror_common::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct HttpImageSource {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl HttpImageSource {
    pub fn new(timeout: Duration, max_bytes: u64) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, max_bytes }
    }

    fn fetch_blocking(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| FetchError::from_ureq(url, e))?;
        let content_type = response.header("content-type").map(str::to_string);

        let mut data = Vec::new();
        response
            .into_reader()
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut data)
            .map_err(|e| FetchError::Read {
                url: url.to_string(),
                source: e,
            })?;
        if data.len() as u64 > self.max_bytes {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }

        Ok(FetchedImage { data, content_type })
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let source = self.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || source.fetch_blocking(&url))
            .await
            .map_err(|e| FetchError::Worker(e.to_string()))?
    }
}
