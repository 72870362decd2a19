//! Playback Events
//!
//! State-change notifications for observers other than the view (loggers,
//! scrobblers, test harnesses). The controller queues them as it mutates
//! state; hosts collect them with
//! [`PlaybackController::drain_events`](crate::PlaybackController::drain_events).

use crate::types::PlaybackStatus;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback status changed
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// A different track was selected
    TrackChanged {
        /// Catalog position of the new track
        index: usize,
        /// Catalog position of the previous track (if any)
        previous_index: Option<usize>,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// Logical volume (0.0-1.0)
        volume: f64,
        /// Whether output is muted
        is_muted: bool,
    },

    /// Position mirror refreshed from the transport
    PositionChanged {
        /// Elapsed seconds
        position: f64,
        /// Total seconds, when known
        duration: Option<f64>,
    },

    /// A non-fatal error was swallowed
    Error {
        /// Error message
        message: String,
    },
}
