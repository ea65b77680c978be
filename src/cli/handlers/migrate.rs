//! Migrate command handler

use crate::config::settings::Settings;
use crate::db::{pending_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Applies pending migrations, or with `dry_run` only lists them.
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        self.config.database.validate()?;

        if dry_run {
            self.show_pending_migrations().await
        } else {
            self.run_migrations().await
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");
        let pending = pending_migrations(&self.config.database.url).await?;

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }
        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");
        let applied = run_pending_migrations(&self.config.database.url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
