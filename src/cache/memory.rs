//! In-process store using cached::TimedSizedCache.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};

use crate::cache::{CacheError, KeyValueStore};

/// Size-bounded map with one lifespan for every entry.
///
/// The per-call TTL is ignored; entries expire after the lifespan given at
/// construction, which is the configured `cache.ttl_seconds`.
pub struct MemoryStore {
    store: Mutex<TimedSizedCache<String, String>>,
}

impl MemoryStore {
    pub fn new(max_size: usize, ttl_seconds: u64) -> Self {
        Self {
            store: Mutex::new(TimedSizedCache::with_size_and_lifespan(
                max_size.max(1),
                Duration::from_secs(ttl_seconds),
            )),
        }
    }

    fn with_store<R>(
        &self,
        f: impl FnOnce(&mut TimedSizedCache<String, String>) -> R,
    ) -> Result<R, CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(f(&mut store))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.with_store(|store| store.cache_get(key).cloned())
    }

    async fn set(&self, key: &str, value: String, _ttl_seconds: u64) -> Result<(), CacheError> {
        self.with_store(|store| {
            store.cache_set(key.to_string(), value);
        })
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.with_store(|store| {
            store.cache_remove(key);
        })
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        self.with_store(|store| store.cache_clear())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        self.with_store(|_| ())
    }
}
