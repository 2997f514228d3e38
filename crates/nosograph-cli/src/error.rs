//! Error types for the CLI application.

use nosograph_builder::BuildError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Build error (disclosure violation, missing endpoint reference)
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Malformed source file
    #[error("Invalid source {}: {message}", path.display())]
    Source {
        /// Source file
        path: PathBuf,
        /// What was wrong
        message: String,
    },

    /// Refusing to overwrite an existing output file
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Build a source error for `path`
    pub fn source_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CliError::Source {
            path: path.into(),
            message: message.into(),
        }
    }
}
