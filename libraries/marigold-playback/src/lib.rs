//! Marigold Player - Playback State Machine
//!
//! Platform-agnostic playlist playback for Marigold Player.
//!
//! This crate provides:
//! - Track selection, play/pause and wrapping next/previous
//! - Autoplay gating on the first user gesture
//! - Stale play-request detection via [`PlayTicket`]s
//! - Percentage seek and keyboard nudges
//! - Volume control (0-100%, mute/unmute with level restore)
//! - Progress bar and `M:SS` label synchronization
//! - Optional OS media-session bridge (metadata + transport actions)
//!
//! # Architecture
//!
//! `marigold-playback` owns no I/O. The host supplies three collaborators
//! through traits:
//! - [`MediaElement`]: decodes and plays audio
//! - [`PresentationSink`]: draws the UI
//! - [`MediaSession`]: the OS media-control surface (optional)
//!
//! Everything is single-threaded. Play requests come back to the host as
//! futures ([`PlaybackController::take_pending_plays`]); the host polls them
//! on its own executor and reports each [`PlayOutcome`] through
//! [`PlaybackController::on_play_settled`].
//!
//! # Example
//!
//! ```rust
//! use futures::executor::block_on;
//! use futures::future::{self, FutureExt};
//! use marigold_core::Catalog;
//! use marigold_playback::{
//!     MediaElement, MediaPlayFuture, NullSink, PlaybackController, PlaybackStatus,
//!     PlayerCommand, PlayerConfig,
//! };
//!
//! #[derive(Default)]
//! struct Silent {
//!     paused: bool,
//!     volume: f64,
//! }
//!
//! impl MediaElement for Silent {
//!     fn load(&mut self, _uri: &str) { self.paused = true; }
//!     fn play(&mut self) -> MediaPlayFuture {
//!         self.paused = false;
//!         future::ready(Ok(())).boxed_local()
//!     }
//!     fn pause(&mut self) { self.paused = true; }
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn duration(&self) -> f64 { f64::NAN }
//!     fn volume(&self) -> f64 { self.volume }
//!     fn set_volume(&mut self, volume: f64) { self.volume = volume; }
//!     fn is_paused(&self) -> bool { self.paused }
//! }
//!
//! let mut player = PlaybackController::new(
//!     Catalog::demo(),
//!     Box::new(Silent::default()),
//!     Box::new(NullSink),
//!     PlayerConfig::default(),
//! );
//!
//! player.dispatch(PlayerCommand::SelectTrack(1));
//! assert_eq!(player.state().status, PlaybackStatus::Loading);
//!
//! for pending in player.take_pending_plays() {
//!     let outcome = block_on(pending);
//!     player.on_play_settled(outcome);
//! }
//! assert_eq!(player.state().status, PlaybackStatus::Playing);
//! ```

mod controller;
mod error;
pub mod events;
pub mod input;
pub mod progress;
pub mod session;
pub mod transport;
pub mod types;
pub mod view;
pub mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{MediaError, PlaybackError, Result, SessionError};
pub use events::PlaybackEvent;
pub use input::{Key, KeyBindings, PlayerCommand};
pub use progress::{format_time, ProgressSynchronizer, ProgressUpdate};
pub use session::{
    MediaAction, MediaActionKind, MediaArtwork, MediaMetadata, MediaSession, OsTransportBridge,
    SessionPlaybackState,
};
pub use transport::{
    MediaElement, MediaEvent, MediaPlayFuture, PendingPlay, PlayOutcome, PlayTicket,
    TransportAdapter,
};
pub use types::{PlaybackSnapshot, PlaybackState, PlaybackStatus, PlayerConfig, DEFAULT_VOLUME};
pub use view::{NullSink, PresentationSink};
pub use volume::VolumeLevel;
