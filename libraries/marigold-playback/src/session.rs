//! OS transport bridge
//!
//! Connects the controller to the operating system's media-control surface
//! (lock screen, media keys, notification center). The surface is optional:
//! hosts without one simply never attach a bridge.

use crate::error::{PlaybackError, SessionError};
use crate::types::PlayerConfig;
use marigold_core::Track;
use serde::{Deserialize, Serialize};

/// Actions a media session can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaActionKind {
    Play,
    Pause,
    PreviousTrack,
    NextTrack,
    SeekBackward,
    SeekForward,
}

impl MediaActionKind {
    /// Every action the bridge registers
    pub const ALL: [MediaActionKind; 6] = [
        MediaActionKind::Play,
        MediaActionKind::Pause,
        MediaActionKind::PreviousTrack,
        MediaActionKind::NextTrack,
        MediaActionKind::SeekBackward,
        MediaActionKind::SeekForward,
    ];
}

/// An external transport command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaAction {
    Play,
    Pause,
    PreviousTrack,
    NextTrack,
    /// Seek back by `offset` seconds (bridge default when absent)
    SeekBackward { offset: Option<f64> },
    /// Seek forward by `offset` seconds (bridge default when absent)
    SeekForward { offset: Option<f64> },
}

impl MediaAction {
    /// The registration slot this action arrives through
    pub fn kind(&self) -> MediaActionKind {
        match self {
            MediaAction::Play => MediaActionKind::Play,
            MediaAction::Pause => MediaActionKind::Pause,
            MediaAction::PreviousTrack => MediaActionKind::PreviousTrack,
            MediaAction::NextTrack => MediaActionKind::NextTrack,
            MediaAction::SeekBackward { .. } => MediaActionKind::SeekBackward,
            MediaAction::SeekForward { .. } => MediaActionKind::SeekForward,
        }
    }
}

/// One artwork entry in the metadata pushed to the OS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaArtwork {
    pub src: String,
    pub sizes: String,
    pub mime_type: String,
}

/// Metadata displayed by the OS media surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub title: String,
    pub artist: String,
    pub artwork: Vec<MediaArtwork>,
}

/// Playback state mirrored to the OS media surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPlaybackState {
    None,
    Paused,
    Playing,
}

/// OS media-control surface supplied by the host
///
/// Registration tells the surface which actions to offer. The host routes
/// each delivered [`MediaAction`] to
/// [`PlaybackController::handle_media_action`](crate::PlaybackController::handle_media_action).
pub trait MediaSession {
    /// Offer an action on the OS surface
    fn register_action(&mut self, action: MediaActionKind) -> Result<(), SessionError>;

    /// Replace the displayed metadata
    fn set_metadata(&mut self, metadata: MediaMetadata) -> Result<(), SessionError>;

    /// Mirror the playback state
    fn set_playback_state(&mut self, state: SessionPlaybackState) -> Result<(), SessionError>;
}

/// Owns the media session and shields the controller from its failures
pub struct OsTransportBridge {
    session: Box<dyn MediaSession>,
    artwork_sizes: String,
    artwork_mime_type: String,
    registered: Vec<MediaActionKind>,
}

impl OsTransportBridge {
    /// Attach to a media session and register all six actions
    ///
    /// Actions the session refuses are logged and left unregistered.
    pub fn new(mut session: Box<dyn MediaSession>, config: &PlayerConfig) -> Self {
        let mut registered = Vec::with_capacity(MediaActionKind::ALL.len());
        for kind in MediaActionKind::ALL {
            match session.register_action(kind) {
                Ok(()) => registered.push(kind),
                Err(e) => tracing::warn!(action = ?kind, error = %e, "Media action not registered"),
            }
        }

        Self {
            session,
            artwork_sizes: config.artwork_sizes.clone(),
            artwork_mime_type: config.artwork_mime_type.clone(),
            registered,
        }
    }

    /// Actions the session accepted
    pub fn registered_actions(&self) -> &[MediaActionKind] {
        &self.registered
    }

    /// Metadata describing `track`
    pub fn metadata_for(&self, track: &Track) -> MediaMetadata {
        let artwork = track
            .artwork()
            .map(|src| MediaArtwork {
                src: src.to_string(),
                sizes: self.artwork_sizes.clone(),
                mime_type: self.artwork_mime_type.clone(),
            })
            .into_iter()
            .collect();

        MediaMetadata {
            title: track.title.clone(),
            artist: track.artist.clone(),
            artwork,
        }
    }

    /// Push metadata for a newly selected track
    pub fn publish_metadata(&mut self, track: &Track) -> Result<(), PlaybackError> {
        let metadata = self.metadata_for(track);
        self.session
            .set_metadata(metadata)
            .map_err(PlaybackError::MetadataPushFailure)
    }

    /// Mirror the playback state; failures are logged only
    pub fn publish_playback_state(&mut self, state: SessionPlaybackState) {
        if let Err(e) = self.session.set_playback_state(state) {
            tracing::warn!(?state, error = %e, "Media session playback state update failed");
        }
    }
}

/// Offset to use for a seek action, falling back to `default` when the
/// session omits one or sends something unusable
pub fn resolve_seek_offset(requested: Option<f64>, default: f64) -> f64 {
    match requested {
        Some(offset) if offset.is_finite() && offset > 0.0 => offset,
        _ => default,
    }
}

/// Target time for a seek-backward action, never below zero
pub fn seek_backward_target(current_time: f64, offset: f64) -> f64 {
    (current_time - offset).max(0.0)
}

/// Target time for a seek-forward action
///
/// Clamped to the duration, or to zero while the duration is unknown.
pub fn seek_forward_target(current_time: f64, duration: Option<f64>, offset: f64) -> f64 {
    (current_time + offset).min(duration.unwrap_or(0.0)).max(0.0)
}
