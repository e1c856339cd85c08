//! Error types for the reflective core.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the catalog, recommender, trackers, and conversation memory.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Mode '{0}' not found")]
    ModeNotFound(String),

    #[error("Invalid mode catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid mood value: {0}")]
    InvalidMood(String),

    #[error("{0} must not be empty")]
    EmptyContent(String),

    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
