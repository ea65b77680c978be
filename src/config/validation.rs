//! Validation rules applied after every configuration load

use crate::config::error::ConfigError;
use crate::config::settings::{
    CacheBackend, CacheConfig, DatabaseConfig, LoggerSettings, ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host must not be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// # Validation Rules
    /// - URL must be a postgres URL
    /// - Pool bounds must be non-zero with min <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or RECIPE_DATABASE__URL.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Plain levels are checked strictly, anything with a target is left to EnvFilter
        if !self.level.contains('=')
            && !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str())
        {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        Ok(())
    }
}

impl CacheConfig {
    /// Missing Redis credentials are not an error; they disable caching at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "cache.ttl_seconds",
                "Cache TTL must be greater than 0 seconds.",
            ));
        }

        match self.backend {
            CacheBackend::Memory => {
                if self.memory.max_size == 0 {
                    return Err(ConfigError::validation(
                        "cache.memory.max_size",
                        "Memory cache size must be greater than 0.",
                    ));
                }
            }
            CacheBackend::Redis => {
                let url = self.redis.url.trim();
                if !url.is_empty() && !url.starts_with("redis://") && !url.starts_with("rediss://")
                {
                    return Err(ConfigError::validation(
                        "cache.redis.url",
                        "Invalid Redis URL. Expected redis:// or rediss://",
                    ));
                }
                if self.redis.pool_size == 0 {
                    return Err(ConfigError::validation(
                        "cache.redis.pool_size",
                        "Redis pool size must be greater than 0.",
                    ));
                }
                if self.redis.operation_timeout_ms == 0 {
                    return Err(ConfigError::validation(
                        "cache.redis.operation_timeout_ms",
                        "Operation timeout must be greater than 0.",
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Returns the first validation error across all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        self.cache.validate()?;
        Ok(())
    }
}
