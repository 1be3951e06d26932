//! Error types for announcement extraction

use thiserror::Error;

/// Result type alias for sg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sg-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured CSS selector could not be compiled
    #[error("Invalid selector `{name}`: {reason}")]
    Selector { name: &'static str, reason: String },
}
