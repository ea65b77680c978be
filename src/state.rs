//! Application state for Axum web framework.

use crate::cache::EntityCaches;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared handler state. Every field is Arc-backed, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Direct pool access for health checks
    pub db_pool: AsyncDbPool,
    pub caches: EntityCaches,
}

impl AppState {
    /// Builds repositories and services over `pool`, all sharing `caches`.
    pub fn new(pool: AsyncDbPool, caches: EntityCaches) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos, caches.clone());
        Self {
            services,
            db_pool: pool,
            caches,
        }
    }
}
