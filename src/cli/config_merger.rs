//! Applies CLI overrides on top of file and environment configuration.
//!
//! Precedence, lowest first: config files, `RECIPE_*` variables, global
//! flags (`--verbose` / `--quiet`), command flags.

use std::path::Path;

use super::parser::{Cli, Commands, Environment};
use crate::config::ConfigLoader;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the unvalidated base configuration. Validation runs once the
    /// CLI overrides are in place, so a flag can fix an invalid file value.
    pub fn load(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = config_path {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = environment {
            loader = loader.with_environment(env.into());
        }
        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns the merged and validated settings.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
