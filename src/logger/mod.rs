//! Logging setup on top of `tracing-subscriber`
//!
//! Console output (ANSI only on a terminal) and an optional file output in
//! full, compact or JSON format, both behind one `EnvFilter`.

pub mod config;
pub mod error;

pub use config::LogFormat;
pub use error::LoggerError;

use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::settings::{FileSettings, LoggerSettings};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Installs the global subscriber described by `settings`.
pub fn init_logger(settings: &LoggerSettings) -> Result<(), LoggerError> {
    let filter = build_filter(&settings.level)?;
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    // File layer goes first so console ANSI settings cannot leak into it
    if settings.file.enabled {
        layers.push(file_layer(&settings.file)?);
    }

    if settings.console.enabled {
        let use_ansi = settings.console.colored && std::io::stdout().is_terminal();
        layers.push(
            fmt::layer()
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .boxed(),
        );
    }

    if layers.is_empty() {
        return Err(LoggerError::config(
            "At least one output (console or file) must be enabled",
        ));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// Parses a level ("debug") or a full directive ("recipe_catalog=debug,info").
pub fn build_filter(directive: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(directive).map_err(|e| LoggerError::Filter {
        directive: directive.to_string(),
        message: e.to_string(),
    })
}

fn file_layer(settings: &FileSettings) -> Result<BoxedLayer, LoggerError> {
    let writer = Mutex::new(open_log_file(Path::new(&settings.path), settings.append)?);
    let base = fmt::layer().with_ansi(false).with_target(true);

    Ok(match settings.format {
        LogFormat::Full => base.with_writer(writer).boxed(),
        LogFormat::Compact => base.compact().with_writer(writer).boxed(),
        LogFormat::Json => base.json().with_writer(writer).boxed(),
    })
}

fn open_log_file(path: &Path, append: bool) -> Result<File, LoggerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    Ok(options.open(path)?)
}
