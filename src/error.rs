//! Error types for Construe operations.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration loading and vault scans.
///
/// Per-file problems inside a scan are not represented here at all: they are
/// recovered on the spot and reported through `ScanOutcome::skipped`.
#[derive(Error, Debug)]
pub enum ConstrueError {
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Error parsing {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid context '{context}' in configuration: {message}")]
    InvalidContext { context: String, message: String },

    #[error("Vault path does not exist: {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid query argument: {0}")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Construe operations.
pub type Result<T> = std::result::Result<T, ConstrueError>;
