//! Core types for playback management

use marigold_core::Track;
use serde::{Deserialize, Serialize};

/// Playback status
///
/// `Idle` only while no track has ever been selected. Once a track is
/// selected the status cycles through the other three and never returns to
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No track selected yet
    Idle,

    /// Track loaded, waiting for playback to start
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackStatus {
    /// Whether the transport glyph should show "playing"
    pub fn is_playing(self) -> bool {
        self == PlaybackStatus::Playing
    }
}

/// The single mutable playback entity
///
/// Owned and mutated exclusively by
/// [`PlaybackController`](crate::PlaybackController); everything else sees a
/// shared reference or a [`PlaybackSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Selected catalog position, `None` before the first selection
    pub current_index: Option<usize>,

    /// Playback status
    pub status: PlaybackStatus,

    /// Logical volume (0.0-1.0), kept at its pre-mute value while muted
    pub volume: f64,

    /// Whether output is muted (transport volume is 0.0)
    pub is_muted: bool,

    /// Level restored by unmuting; meaningful only while muted
    pub previous_volume: f64,

    /// Set permanently on the first qualifying user interaction
    pub has_user_gesture: bool,

    /// Mirror of the transport's current time in seconds
    pub position: f64,

    /// Mirror of the transport's duration in seconds, when known
    pub duration: Option<f64>,
}

impl PlaybackState {
    /// Startup state at the given volume (0.0-1.0)
    pub fn new(volume: f64) -> Self {
        Self {
            current_index: None,
            status: PlaybackStatus::Idle,
            volume: volume.clamp(0.0, 1.0),
            is_muted: false,
            previous_volume: DEFAULT_VOLUME,
            has_user_gesture: false,
            position: 0.0,
            duration: None,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

/// Read-only copy of the playback state plus the selected track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Playback state at the time of the snapshot
    pub state: PlaybackState,

    /// Track at `state.current_index`
    pub track: Option<Track>,
}

/// Startup volume and the level unmuting falls back to
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 50)
    pub initial_volume: u8,

    /// Keyboard seek nudge in seconds (default: 5)
    pub seek_step_secs: f64,

    /// Keyboard volume nudge in percent (default: 10)
    pub volume_step: u8,

    /// Seek offset used when a media key omits one (default: 5)
    pub media_session_seek_offset_secs: f64,

    /// Size hint attached to artwork pushed to the OS (default: "300x300")
    pub artwork_sizes: String,

    /// MIME type attached to artwork pushed to the OS (default: "image/png")
    pub artwork_mime_type: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 50,
            seek_step_secs: 5.0,
            volume_step: 10,
            media_session_seek_offset_secs: 5.0,
            artwork_sizes: "300x300".to_string(),
            artwork_mime_type: "image/png".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Initial volume as a 0.0-1.0 level
    pub fn initial_level(&self) -> f64 {
        f64::from(self.initial_volume.min(100)) / 100.0
    }
}
