//! Error types for echo2mox_core

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the normalization core
#[derive(Debug, Error)]
pub enum Error {
    /// The input table has no `Name` or `Edition` column after renaming
    #[error("Missing required column: {0}")]
    MissingRequiredColumn(String),
    /// CSV decoding or encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A rule file could not be parsed
    #[error("Invalid rule file {}: {source}", .path.display())]
    Rules {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for echo2mox_core operations
pub type Result<T> = std::result::Result<T, Error>;
