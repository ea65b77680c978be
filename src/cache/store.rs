//! Key-value backend contract.

use async_trait::async_trait;

use crate::cache::CacheError;

/// Minimal string key-value store the typed caches are built on.
///
/// Every method may fail; callers inside the cache layer treat failures
/// as misses.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Backend name for logs and health output.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value`, overwriting any previous entry and resetting its TTL.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Drops every key in the backend, not just one kind.
    async fn flush_all(&self) -> Result<(), CacheError>;

    async fn ping(&self) -> Result<(), CacheError>;
}
