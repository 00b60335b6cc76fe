//! Error types for echo2mox

use thiserror::Error;

/// Unified error type for fetching and converting exports
#[derive(Debug, Error)]
pub enum Error {
    /// Transform, CSV or rule file failure from the core
    #[error(transparent)]
    Core(#[from] echo2mox_core::Error),
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// EchoMTG answered the export request with a non-success status
    #[error("Failed to fetch data: {}", .0.as_u16())]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Login rejected or token unusable
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// Missing or inconsistent settings
    #[error("Configuration error: {0}")]
    Config(String),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for echo2mox operations
pub type Result<T> = std::result::Result<T, Error>;
