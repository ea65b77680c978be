//! Logger error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A global subscriber was already installed
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
