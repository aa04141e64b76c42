use std::{str::FromStr, time::Duration};

use blockmirror_common::naming::ObjectNaming;
use blockmirror_document_client::notion::DEFAULT_BASE_URL;
use blockmirror_uploader::image_source::DEFAULT_MAX_IMAGE_BYTES;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub notion_token: String,
    pub notion_base_url: String,
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub s3_bucket_name: String,
    pub s3_endpoint: Option<String>,
    pub http_timeout: Duration,
    pub max_image_bytes: u64,
    pub fingerprint_cache_capacity: usize,
    pub object_naming: ObjectNaming,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let aws_access_key_id = match lookup("AWS_ACCESS_TOKEN").filter(|v| !v.is_empty()) {
            Some(key) => key,
            None => required("AWS_ACCESS_KEY_ID")
                .map_err(|_| ConfigError::Missing("AWS_ACCESS_TOKEN"))?,
        };

        let derive_extension: bool =
            parse_or(&lookup, "DERIVE_EXTENSION_FROM_CONTENT_TYPE", false)?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            notion_token: required("NOTION_TOKEN")?,
            notion_base_url: lookup("NOTION_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            aws_region: required("AWS_REGION")?,
            aws_access_key_id,
            aws_secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            s3_bucket_name: required("S3_BUCKET_NAME")?,
            s3_endpoint: lookup("S3_ENDPOINT").filter(|v| !v.is_empty()),
            http_timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            max_image_bytes: parse_or(&lookup, "MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?,
            fingerprint_cache_capacity: parse_or(&lookup, "FINGERPRINT_CACHE_CAPACITY", 0)?,
            object_naming: if derive_extension {
                ObjectNaming::FromContentType
            } else {
                ObjectNaming::FixedJpg
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
