//! Track domain type

use serde::{Deserialize, Serialize};

/// A playable entry in the catalog
///
/// Tracks are immutable once loaded. A track's identity is its position in
/// the [`Catalog`](crate::Catalog) it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// URI handed to the media element when the track is loaded
    #[serde(alias = "url")]
    pub media_uri: String,

    /// Cover art URI (empty when the track has none)
    #[serde(default, alias = "cover")]
    pub artwork_uri: String,
}

impl Track {
    /// Create a new track without artwork
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        media_uri: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            media_uri: media_uri.into(),
            artwork_uri: String::new(),
        }
    }

    /// Attach a cover art URI
    #[must_use]
    pub fn with_artwork(mut self, artwork_uri: impl Into<String>) -> Self {
        self.artwork_uri = artwork_uri.into();
        self
    }

    /// Cover art URI, if the track has one
    pub fn artwork(&self) -> Option<&str> {
        if self.artwork_uri.is_empty() {
            None
        } else {
            Some(&self.artwork_uri)
        }
    }
}
