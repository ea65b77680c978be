//! Serve command handler

use crate::config::settings::Settings;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the server, or with `dry_run` only re-validates the settings.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }
        Server::new(self.config).run().await
    }

    fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..{} connections",
            self.config.database.min_connections, self.config.database.max_connections
        );
        if !self.config.cache.enabled {
            println!("✓ Cache disabled by configuration");
        } else {
            println!("✓ Cache backend: {:?}", self.config.cache.backend);
        }
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/recipes".to_string();
        config
    }

    #[test]
    fn test_serve_handler_new() {
        let config = valid_config();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_dry_run_valid_config() {
        let result = ServeCommandHandler::new(valid_config()).execute(true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_invalid_config() {
        let mut config = valid_config();
        config.server.port = 0;

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(result.is_err());
    }
}
