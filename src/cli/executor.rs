//! Dispatches a parsed command to its handler.

use super::handlers::{CacheCommandHandler, MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;

/// Runs the selected command; no subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run }) => {
            MigrateCommandHandler::new(settings).execute(*dry_run).await?;
            Ok(())
        }
        Some(Commands::Cache { action }) => {
            CacheCommandHandler::connect(&settings)
                .await
                .execute(*action)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/recipes".to_string();
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["recipe-catalog", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_cache_ping_with_cache_disabled() {
        let cli = Cli::try_parse_from(["recipe-catalog", "cache", "ping"]).unwrap();
        let mut config = valid_config();
        config.cache.enabled = false;

        assert!(execute_command(&cli, config).await.is_ok());
    }
}
