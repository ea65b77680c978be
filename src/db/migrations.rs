//! Embedded migration runner.
//!
//! `MigrationHarness` is synchronous, so each call opens a plain
//! `PgConnection` on a blocking thread.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

/// Names of migrations not yet applied.
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, |conn| {
        conn.pending_migrations(MIGRATIONS)
            .map(|pending| pending.iter().map(|m| m.name().to_string()).collect())
            .map_err(|e| AppError::Database {
                operation: "check pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })
    })
    .await
}

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, |conn| {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.iter().map(|v| v.to_string()).collect())
            .map_err(|e| AppError::Database {
                operation: "run pending migrations".to_string(),
                source: anyhow::anyhow!("Migration error: {}", e),
            })
    })
    .await
}

async fn with_connection<T, F>(database_url: &str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::anyhow!("Connection error: {}", e),
        })?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}
