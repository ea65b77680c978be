//! Reporting hooks for cache outcomes that are swallowed by `TypedCache`.

use std::fmt;

use dashmap::DashSet;

use crate::cache::CacheError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOp {
    Get,
    Set,
    Invalidate,
    Clear,
}

impl CacheOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOp::Get => "get",
            CacheOp::Set => "set",
            CacheOp::Invalidate => "invalidate",
            CacheOp::Clear => "clear",
        }
    }
}

impl fmt::Display for CacheOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives every cache outcome the caller does not see.
///
/// "Disabled" means no backend was configured or reachable at startup and
/// is expected; "failure" is a backend or payload error on a live backend.
pub trait CacheObserver: Send + Sync {
    fn on_disabled(&self, kind: &str, op: CacheOp);

    fn on_failure(&self, kind: &str, op: CacheOp, id: Option<i64>, error: &CacheError);

    fn on_hit(&self, _kind: &str, _id: i64) {}

    fn on_miss(&self, _kind: &str, _id: i64) {}
}

/// Logs through `tracing`. Disabled notices are emitted once per kind and
/// operation so a cacheless deployment does not log on every request.
#[derive(Debug, Default)]
pub struct TracingObserver {
    announced: DashSet<(String, CacheOp)>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheObserver for TracingObserver {
    fn on_disabled(&self, kind: &str, op: CacheOp) {
        if self.announced.insert((kind.to_string(), op)) {
            tracing::info!(kind, op = %op, "Cache disabled, skipping");
        }
    }

    fn on_failure(&self, kind: &str, op: CacheOp, id: Option<i64>, error: &CacheError) {
        match id {
            Some(id) => tracing::error!(kind, op = %op, id, error = %error, "Cache operation failed"),
            None => tracing::error!(kind, op = %op, error = %error, "Cache operation failed"),
        }
    }

    fn on_hit(&self, kind: &str, id: i64) {
        tracing::trace!(kind, id, "Cache hit");
    }

    fn on_miss(&self, kind: &str, id: i64) {
        tracing::trace!(kind, id, "Cache miss");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_notice_recorded_once_per_kind_and_op() {
        let observer = TracingObserver::new();
        observer.on_disabled("recipe", CacheOp::Get);
        observer.on_disabled("recipe", CacheOp::Get);
        observer.on_disabled("recipe", CacheOp::Set);
        observer.on_disabled("region", CacheOp::Get);

        assert_eq!(observer.announced.len(), 3);
    }
}
