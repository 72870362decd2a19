//! Core error types for Marigold Player

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Marigold Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid TOML or does not match the catalog layout
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    /// A catalog entry is missing required data
    #[error("Invalid track at position {index}: {reason}")]
    InvalidTrack {
        /// Position of the offending entry in the catalog file
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid track error
    pub fn invalid_track(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTrack {
            index,
            reason: reason.into(),
        }
    }
}
