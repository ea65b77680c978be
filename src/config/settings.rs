//! Configuration settings structures
//!
//! Every field has a serde default so partial TOML files and sparse
//! environment overrides deserialize into a complete `Settings`.

use serde::{Deserialize, Serialize};

use crate::logger::LogFormat;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "recipe-catalog".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/recipe-catalog.log".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_memory_max_size() -> usize {
    10_000
}

fn default_redis_pool_size() -> u32 {
    8
}

fn default_redis_connection_timeout() -> u64 {
    5
}

fn default_redis_operation_timeout_ms() -> u64 {
    500
}

// ============================================================================
// Application / Server / Database
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// "host:port" as passed to the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Seconds to wait for a pooled connection
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Run pending migrations before serving
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// ANSI colors, only honoured when stdout is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Level or full `EnvFilter` directive, e.g. "info" or "recipe_catalog=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

// ============================================================================
// Cache Configuration
// ============================================================================

/// Key-value backend behind the entity caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process store, lost on restart
    Memory,
    #[default]
    Redis,
}

impl CacheBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Memory => "memory",
            CacheBackend::Redis => "redis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries before the oldest are evicted
    #[serde(default = "default_memory_max_size")]
    pub max_size: usize,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_size: default_memory_max_size(),
        }
    }
}

/// Redis connection settings.
///
/// Caching stays disabled for the process lifetime when either `url` or
/// `token` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    #[serde(default)]
    pub url: String,

    /// Access token, sent as the connection password
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_redis_pool_size")]
    pub pool_size: u32,

    /// Seconds allowed for establishing a connection
    #[serde(default = "default_redis_connection_timeout")]
    pub connection_timeout: u64,

    /// Upper bound for a single get/set/delete/flush
    #[serde(default = "default_redis_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl RedisCacheConfig {
    pub fn has_credentials(&self) -> bool {
        !self.url.trim().is_empty() && !self.token.trim().is_empty()
    }
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            pool_size: default_redis_pool_size(),
            connection_timeout: default_redis_connection_timeout(),
            operation_timeout_ms: default_redis_operation_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub backend: CacheBackend,

    /// Lifetime of every cache entry in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    #[serde(default)]
    pub memory: MemoryCacheConfig,

    #[serde(default)]
    pub redis: RedisCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackend::default(),
            ttl_seconds: default_cache_ttl(),
            memory: MemoryCacheConfig::default(),
            redis: RedisCacheConfig::default(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub cache: CacheConfig,
}
