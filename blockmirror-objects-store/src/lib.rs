pub mod memory_store;
pub mod objects_store;
pub mod s3_store;

pub use objects_store::{HeadObjectResponse, ObjectsStore, StoreError};

/// Virtual-hosted style URL of an object in a public bucket.
pub fn public_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}
