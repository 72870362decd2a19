//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// None of these are fatal. `InvalidIndex` and `SeekRejected` describe
/// commands the controller ignores; the other variants are logged and
/// swallowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The media element refused to start playing
    #[error("Playback start failed: {0}")]
    PlaybackStartFailure(#[from] MediaError),

    /// The OS media surface rejected a metadata update
    #[error("Metadata push failed: {0}")]
    MetadataPushFailure(#[source] SessionError),

    /// Selection given an index outside the catalog
    #[error("Invalid track index: {0}")]
    InvalidIndex(usize),

    /// Seek requested without a known duration
    #[error("Seek rejected: {0}")]
    SeekRejected(String),

    /// Error reported asynchronously by the media element
    #[error("Media element error: {0}")]
    Media(String),
}

/// Failure reported by a media element's `play()` request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// Autoplay policy blocked playback without a user gesture
    #[error("playback not allowed: {0}")]
    NotAllowed(String),

    /// The source could not be decoded
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request was interrupted by a new load or a pause
    #[error("play request aborted")]
    Aborted,

    /// Anything else the element reports
    #[error("{0}")]
    Other(String),
}

/// Failure reported by the OS media-control surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The surface does not support the requested action
    #[error("unsupported media action: {0}")]
    UnsupportedAction(String),

    /// The surface rejected the update
    #[error("media session rejected update: {0}")]
    Rejected(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
