//! Layered configuration loading

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "RECIPE_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "RECIPE_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "RECIPE";
const ENV_SEPARATOR: &str = "__";

/// Loads `Settings` from TOML files plus `RECIPE_*` environment variables.
///
/// Layered mode reads `default.toml` (required), `{environment}.toml` and
/// `local.toml` (optional) from the config directory. Single-file mode reads
/// only the given file. Environment variables always win:
/// `RECIPE_CACHE__REDIS__TOKEN` maps to `cache.redis.token`.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Builds a loader from `RECIPE_CONFIG_DIR`, `RECIPE_CONFIG_FILE` and
    /// `RECIPE_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both `RECIPE_CONFIG_DIR` and `RECIPE_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if dir_var.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "RECIPE_CONFIG_DIR and RECIPE_CONFIG_FILE cannot both be set. \
                 Use RECIPE_CONFIG_DIR for layered configuration or \
                 RECIPE_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Switches to single-file mode.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Overrides the environment overlay picked from `RECIPE_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads, deserializes and validates the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads without validation so CLI overrides can be applied first.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(file) => Self::add_file_source(builder, file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder =
            Self::add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let builder = Self::add_file_source(
            builder,
            &self
                .config_dir
                .join(format!("{}.toml", self.environment.as_str())),
            false,
        )?;
        Self::add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }
}
