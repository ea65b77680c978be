//! Command-line interface: argument parsing, configuration merging and
//! command dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{CacheAction, Cli, Commands, Environment, LogLevel};

use crate::config::settings::Settings;
use crate::logger::init_logger;

/// Loads configuration files and environment, then applies CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::load(cli.config.as_deref(), cli.env)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    merger
        .merge_cli_args(cli)
        .map_err(|e| anyhow::anyhow!("Configuration merge error: {}", e))
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    init_logger(&settings.logger).map_err(|e| anyhow::anyhow!("Logger initialization error: {}", e))
}
