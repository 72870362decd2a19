//! Catalog domain type

use super::Track;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered, immutable sequence of tracks
///
/// The catalog is fixed for the lifetime of a session. An empty catalog is
/// valid; every navigation command against it is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    tracks: Vec<Track>,
}

/// On-disk layout of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

impl Catalog {
    /// Create a catalog from an ordered list of tracks
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// The three-track playlist bundled with the player
    pub fn demo() -> Self {
        const BASE: &str = "https://file-examples.com/storage/fe5c6ad09266c4e86a7026a/2017/11";

        Self::new(vec![
            Track::new(
                "Acoustic Breeze",
                "Benjamin Tissot",
                format!("{BASE}/file_example_MP3_1MG.mp3"),
            )
            .with_artwork("https://via.placeholder.com/300x300/1FB8CD/FFFFFF?text=Acoustic+Breeze"),
            Track::new(
                "Creative Minds",
                "Benjamin Tissot",
                format!("{BASE}/file_example_MP3_2MG.mp3"),
            )
            .with_artwork("https://via.placeholder.com/300x300/FFC185/000000?text=Creative+Minds"),
            Track::new(
                "Sunny",
                "Benjamin Tissot",
                format!("{BASE}/file_example_MP3_700KB.mp3"),
            )
            .with_artwork("https://via.placeholder.com/300x300/B4413C/FFFFFF?text=Sunny"),
        ])
    }

    /// Parse a catalog from TOML text
    ///
    /// Expects a `[[tracks]]` array. Every entry needs a non-blank title and
    /// media URI; artist and artwork may be empty.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(input)?;

        for (index, track) in file.tracks.iter().enumerate() {
            if track.title.trim().is_empty() {
                return Err(CoreError::invalid_track(index, "title is empty"));
            }
            if track.media_uri.trim().is_empty() {
                return Err(CoreError::invalid_track(index, "media URI is empty"));
            }
        }

        tracing::debug!(tracks = file.tracks.len(), "Parsed catalog");
        Ok(Self::new(file.tracks))
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), tracks = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate over tracks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
