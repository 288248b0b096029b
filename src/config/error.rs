//! # Configuration Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key resolved from no source
    #[error("required property '{0}' is not set (checked environment, application.properties, application.yaml)")]
    MissingProperty(String),

    /// A key resolved to a value that cannot be used
    #[error("property '{key}' has invalid value '{value}'")]
    InvalidValue { key: String, value: String },

    /// A config file exists but could not be read
    #[error("failed to read {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML config file is malformed
    #[error("failed to parse {path}: {source}", path = path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `.properties` file contains a bad escape sequence
    #[error("invalid escape sequence in {path} at line {line}", path = path.display())]
    InvalidEscape { path: PathBuf, line: usize },

    /// The `.env` file exists but could not be loaded
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}
