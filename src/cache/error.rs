//! Cache error types.

use thiserror::Error;

/// Failures of a single cache operation.
///
/// These never leave the cache layer: `TypedCache` reports them to its
/// observer and degrades to a miss or a no-op.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache operation failed: {0}")]
    Operation(String),

    #[error("Cache connection failed: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cached payload could not be parsed: {0}")]
    Deserialization(String),

    #[error("Cache {operation} timed out after {millis}ms")]
    Timeout { operation: &'static str, millis: u64 },
}
