//! Read-through cache layer over a key-value backend.
//!
//! `TypedCache<T>` gives each entity kind its own key namespace on one
//! shared `CacheConnection`. When no backend is available the connection
//! holds no store and every operation degrades to a miss or a no-op.

mod connection;
mod detail;
mod entities;
mod error;
mod memory;
mod observer;
mod redis;
mod store;
mod typed;

pub use connection::{CacheConnection, CacheStatus};
pub use detail::{DetailAssembler, DetailSource};
pub use entities::{EntityCaches, entity_caches, init_entity_caches, kinds};
pub use error::CacheError;
pub use memory::MemoryStore;
pub use observer::{CacheObserver, CacheOp, TracingObserver};
pub use self::redis::RedisStore;
pub use store::KeyValueStore;
pub use typed::TypedCache;

#[cfg(test)]
pub(crate) use typed::test_support;
