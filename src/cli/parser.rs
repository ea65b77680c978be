//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Recipe catalog API server
#[derive(Parser, Debug)]
#[command(name = "recipe-catalog")]
#[command(about = "Recipe catalog REST API with a read-through cache")]
#[command(long_about = "
Serves the recipe catalog over HTTP, backed by PostgreSQL and an optional
Redis cache. Without a reachable cache every request goes to the database.

EXAMPLES:
    # Start the server with layered configuration from ./config
    recipe-catalog serve

    # Bind to all interfaces on a custom port
    recipe-catalog serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    recipe-catalog --config /etc/recipe-catalog/production.toml serve

    # Check configuration without starting
    recipe-catalog serve --dry-run

    # Apply or preview migrations
    recipe-catalog migrate
    recipe-catalog migrate --dry-run

    # Check or empty the cache
    recipe-catalog cache ping
    recipe-catalog cache clear
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single configuration file instead of the layered config directory
    ///
    /// Example: --config /etc/recipe-catalog/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Environment overlay to load, overriding RECIPE_APP_ENV
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Error-level logging only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   recipe-catalog serve
    ///   recipe-catalog serve --host 0.0.0.0 --port 80
    ///   recipe-catalog serve --dry-run
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override, taking precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply embedded database migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long)]
        dry_run: bool,
    },
    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Flush every key in the cache backend
    Clear,
    /// Report whether the cache backend is reachable
    Ping,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
