/// Failure to read from the document service or an image source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: Box<ureq::Transport>,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to read response from {url}: {source}")]
    Read {
        url: String,
        source: std::io::Error,
    },
    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },
    #[error("{block_id:?} is not a valid block id")]
    InvalidBlockId { block_id: String },
    #[error("block {block_id} is malformed: {reason}")]
    MalformedBlock { block_id: String, reason: String },
    #[error("fetch worker stopped: {0}")]
    Worker(String),
}

impl FetchError {
    pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => FetchError::Status {
                url: url.to_string(),
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: url.to_string(),
                source: Box::new(transport),
            },
        }
    }
}
