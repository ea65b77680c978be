//! Cache command handler
//!
//! Opens its own connection from `[cache]`; the running server's in-process
//! memory backend is not reachable from here.

use crate::cache::{CacheConnection, CacheStatus};
use crate::cli::parser::CacheAction;
use crate::config::settings::Settings;

pub struct CacheCommandHandler {
    connection: CacheConnection,
}

impl CacheCommandHandler {
    pub async fn connect(config: &Settings) -> Self {
        Self::new(CacheConnection::connect(&config.cache).await)
    }

    pub fn new(connection: CacheConnection) -> Self {
        Self { connection }
    }

    pub async fn execute(&self, action: CacheAction) -> anyhow::Result<()> {
        match action {
            CacheAction::Ping => self.ping().await,
            CacheAction::Clear => self.clear().await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self.connection.status().await {
            CacheStatus::Disabled => {
                println!("Cache is disabled (no backend configured)");
                Ok(())
            }
            CacheStatus::Up { backend } => {
                println!("✓ Cache backend '{}' is reachable", backend);
                Ok(())
            }
            CacheStatus::Down { backend, error } => {
                anyhow::bail!("Cache backend '{}' is unreachable: {}", backend, error)
            }
        }
    }

    async fn clear(&self) -> anyhow::Result<()> {
        if self.connection.flush_all().await? {
            tracing::info!("Cache flushed");
            println!("✓ Cache cleared");
        } else {
            println!("Cache is disabled; nothing to clear");
        }
        Ok(())
    }
}
