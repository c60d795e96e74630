//! Error types for the scraper library.

use thiserror::Error;

/// Errors surfaced by the walker, pipeline, and bridge client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("a scrape is already in progress")]
    Busy,
    #[error("bridge request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("bridge returned an error for {operation}: {message}")]
    Service { operation: String, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a bridge-side failure on a named operation.
    pub fn service(operation: &str, message: impl Into<String>) -> Self {
        Self::Service {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
