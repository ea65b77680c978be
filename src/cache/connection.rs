//! Shared backend handle for all typed caches.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::cache::{
    CacheError, CacheObserver, KeyValueStore, MemoryStore, RedisStore, TracingObserver,
};
use crate::config::{CacheBackend, CacheConfig};

/// Backend handle, observer and TTL shared by every `TypedCache`.
///
/// `store` is decided once at startup and never reassigned. `None` means
/// caching is disabled for the process lifetime.
#[derive(Clone)]
pub struct CacheConnection {
    store: Option<Arc<dyn KeyValueStore>>,
    observer: Arc<dyn CacheObserver>,
    ttl_seconds: u64,
}

/// Cache state reported by health checks and `cache ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum CacheStatus {
    Disabled,
    Up { backend: String },
    Down { backend: String, error: String },
}

impl CacheConnection {
    pub const DEFAULT_TTL_SECONDS: u64 = 3600;

    pub fn new(
        store: Option<Arc<dyn KeyValueStore>>,
        observer: Arc<dyn CacheObserver>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            observer,
            ttl_seconds,
        }
    }

    pub fn disabled() -> Self {
        Self::new(
            None,
            Arc::new(TracingObserver::new()),
            Self::DEFAULT_TTL_SECONDS,
        )
    }

    /// Opens the configured backend. Never fails: any problem yields a
    /// disabled connection.
    pub async fn connect(config: &CacheConfig) -> Self {
        let store: Option<Arc<dyn KeyValueStore>> = if !config.enabled {
            tracing::info!("Caching disabled by configuration");
            None
        } else {
            match config.backend {
                CacheBackend::Memory => {
                    tracing::info!(max_size = config.memory.max_size, "Using in-process cache");
                    Some(Arc::new(MemoryStore::new(
                        config.memory.max_size,
                        config.ttl_seconds,
                    )))
                }
                CacheBackend::Redis => RedisStore::connect(&config.redis)
                    .await
                    .map(|store| Arc::new(store) as Arc<dyn KeyValueStore>),
            }
        };

        Self::new(store, Arc::new(TracingObserver::new()), config.ttl_seconds)
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub fn store(&self) -> Option<&Arc<dyn KeyValueStore>> {
        self.store.as_ref()
    }

    pub fn observer(&self) -> &dyn CacheObserver {
        self.observer.as_ref()
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub async fn status(&self) -> CacheStatus {
        match &self.store {
            None => CacheStatus::Disabled,
            Some(store) => match store.ping().await {
                Ok(()) => CacheStatus::Up {
                    backend: store.name().to_string(),
                },
                Err(e) => CacheStatus::Down {
                    backend: store.name().to_string(),
                    error: e.to_string(),
                },
            },
        }
    }

    /// Flushes the whole backend, surfacing errors. Returns `Ok(false)`
    /// when caching is disabled.
    pub async fn flush_all(&self) -> Result<bool, CacheError> {
        match &self.store {
            None => Ok(false),
            Some(store) => store.flush_all().await.map(|_| true),
        }
    }
}
