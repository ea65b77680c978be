//! One handler per CLI command.

pub mod cache;
pub mod migrate;
pub mod serve;

pub use cache::CacheCommandHandler;
pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
