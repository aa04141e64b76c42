pub mod fingerprint_cache;
pub mod image_source;
pub mod uploader;

pub use uploader::{ContentAddressedUploader, UploadError};
