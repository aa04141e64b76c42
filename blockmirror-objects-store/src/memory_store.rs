use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{public_object_url, HeadObjectResponse, ObjectsStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// Process-local store addressed like an S3 bucket. With the `test-util`
/// feature it also counts calls and can be switched to failing.
#[derive(Debug)]
pub struct MemoryObjectsStore {
    bucket: String,
    region: String,
    objects: Mutex<HashMap<String, StoredObject>>,
    head_calls: AtomicUsize,
    put_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryObjectsStore {
    pub fn new(bucket: &str, region: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            region: region.to_string(),
            objects: Mutex::new(HashMap::new()),
            head_calls: AtomicUsize::new(0),
            put_calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn head_calls(&self) -> usize {
        self.head_calls.load(Ordering::SeqCst)
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// While set, every head and put fails with `StoreError::Unavailable`.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "bucket {} is unavailable",
                self.bucket
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectsStore for MemoryObjectsStore {
    async fn head_object(&self, key: &str) -> Result<HeadObjectResponse, StoreError> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.objects.lock().contains_key(key) {
            Ok(HeadObjectResponse::Found)
        } else {
            Ok(HeadObjectResponse::NotFound)
        }
    }

    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<(), StoreError> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.objects.lock().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, key)
    }
}
