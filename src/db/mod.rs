//! PostgreSQL access through diesel-async and a bb8 pool.

mod migrations;
mod pool;

pub use migrations::{pending_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, MIGRATIONS, establish_async_connection_pool};
