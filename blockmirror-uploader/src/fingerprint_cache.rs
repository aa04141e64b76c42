use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

/// Bounded object-key → public-URL map. Oldest entries are evicted first.
/// A capacity of zero disables it.
#[derive(Debug)]
pub struct FingerprintCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    urls: HashMap<String, String>,
    order: VecDeque<String>,
}

impl FingerprintCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        self.inner.lock().urls.get(key).cloned()
    }

    pub fn insert(&self, key: String, url: String) {
        if !self.is_enabled() {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.urls.insert(key.clone(), url).is_some() {
            return;
        }
        inner.order.push_back(key);
        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.urls.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
