//! Error types for the photo importer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for photo importer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the photo importer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to scan {path}: {source}")]
    Collection {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("No matching photos found")]
    EmptyInput,

    #[error("Invalid event expression '{expr}': {message}")]
    EventExpression { expr: String, message: String },

    #[error("File operation failed for {path}: {message}")]
    FileOperation { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
