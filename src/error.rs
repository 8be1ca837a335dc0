//! Error types
//!
//! Only geometry generation, settings loading and controller construction
//! (which validates its settings) can fail. Everything else in `sim` is total
//! and reports missing collaborators through `log` instead.

use thiserror::Error;

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied parameter is out of range. Not retryable with the same input.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Settings JSON could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid parameter error
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
