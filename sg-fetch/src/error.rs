//! Error types for page fetching

use thiserror::Error;

/// Result type for page fetching
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while obtaining the feed page
#[derive(Error, Debug)]
pub enum Error {
    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the site
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error from the core crate
    #[error(transparent)]
    Core(#[from] sg_core::Error),
}
