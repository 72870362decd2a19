//! Transport adapter around the host's media element
//!
//! The media element (an `<audio>` tag, a native player, a simulator) is an
//! external collaborator. The adapter gives the controller a small surface
//! over it and turns the element's asynchronous `play()` into a
//! [`PendingPlay`] future tagged with a [`PlayTicket`], so a late resolution
//! can be matched against the request that caused it.
//!
//! The adapter never awaits anything itself. Pending plays are collected with
//! [`TransportAdapter::take_pending`] by the host event loop, which polls them
//! and hands each [`PlayOutcome`] back to
//! [`PlaybackController::on_play_settled`](crate::PlaybackController::on_play_settled).

use crate::error::{MediaError, PlaybackError};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};

/// Future returned by [`MediaElement::play`]
pub type MediaPlayFuture = LocalBoxFuture<'static, Result<(), MediaError>>;

/// Future the host polls to learn how a play request ended
pub type PendingPlay = LocalBoxFuture<'static, PlayOutcome>;

/// Media decode/transport element supplied by the host
///
/// All times are in seconds. Implementations report their own state
/// faithfully; the controller never second-guesses them.
pub trait MediaElement {
    /// Replace the current source. Resets position and stops playback.
    fn load(&mut self, uri: &str);

    /// Request playback. Resolves once playback has actually started, or
    /// with the reason it could not.
    fn play(&mut self) -> MediaPlayFuture;

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position
    fn current_time(&self) -> f64;

    /// Move the playback position
    fn set_current_time(&mut self, seconds: f64);

    /// Length of the loaded source; NaN or infinite while unknown
    fn duration(&self) -> f64;

    /// Output volume (0.0-1.0)
    fn volume(&self) -> f64;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f64);

    /// Element's own paused flag
    fn is_paused(&self) -> bool;
}

/// Lifecycle events reported by the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback started or resumed
    Started,

    /// Playback paused
    Paused,

    /// Current time advanced (native update cadence)
    TimeChanged,

    /// Duration and first frame are available
    MetadataReady,

    /// Source played to the end
    Ended,

    /// Element-level failure (network, decode)
    Error(String),
}

/// Identifies one play request
///
/// `request` is a monotonic counter; `index` is the catalog position that was
/// selected when the request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayTicket {
    /// Monotonic request number
    pub request: u64,

    /// Catalog position the request was made for
    pub index: usize,
}

/// Resolution of a play request
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    /// Request this outcome belongs to
    pub ticket: PlayTicket,

    /// Whether playback started
    pub result: Result<(), PlaybackError>,
}

/// Adapter owning the media element
pub struct TransportAdapter {
    element: Box<dyn MediaElement>,
    next_request: u64,
    pending: Vec<PendingPlay>,
}

impl TransportAdapter {
    /// Wrap a media element
    pub fn new(element: Box<dyn MediaElement>) -> Self {
        Self {
            element,
            next_request: 0,
            pending: Vec::new(),
        }
    }

    // ===== Transport Control =====

    /// Load a source
    pub fn load(&mut self, uri: &str) {
        tracing::debug!(uri, "Loading media source");
        self.element.load(uri);
    }

    /// Issue a play request for the track at `index`
    ///
    /// Returns immediately. The outcome is delivered through the future
    /// queued for [`take_pending`](Self::take_pending).
    pub fn play(&mut self, index: usize) -> PlayTicket {
        self.next_request += 1;
        let ticket = PlayTicket {
            request: self.next_request,
            index,
        };

        let request = self.element.play();
        self.pending.push(
            request
                .map(move |result| PlayOutcome {
                    ticket,
                    result: result.map_err(PlaybackError::from),
                })
                .boxed_local(),
        );

        tracing::trace!(request = ticket.request, index, "Play requested");
        ticket
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.element.pause();
    }

    /// Hand over the play requests issued since the last call
    pub fn take_pending(&mut self) -> Vec<PendingPlay> {
        std::mem::take(&mut self.pending)
    }

    /// Whether play requests are waiting to be collected
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    // ===== Position =====

    /// Current playback position in seconds
    pub fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    /// Move the playback position
    pub fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    /// Raw duration as reported by the element (may be NaN)
    pub fn raw_duration(&self) -> f64 {
        self.element.duration()
    }

    /// Duration when the element reports a positive, finite value
    pub fn duration(&self) -> Option<f64> {
        known_duration(self.element.duration())
    }

    // ===== Volume =====

    /// Output volume (0.0-1.0)
    pub fn volume(&self) -> f64 {
        self.element.volume()
    }

    /// Set output volume, clamped to 0.0-1.0
    pub fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume.clamp(0.0, 1.0));
    }

    // ===== State =====

    /// Element's own paused flag
    pub fn is_paused(&self) -> bool {
        self.element.is_paused()
    }
}

/// A duration is known once it is positive and finite
pub fn known_duration(duration: f64) -> Option<f64> {
    if duration.is_finite() && duration > 0.0 {
        Some(duration)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future;

    #[derive(Default)]
    struct StubElement {
        uri: String,
        time: f64,
        duration: f64,
        volume: f64,
        paused: bool,
        fail_play: bool,
    }

    impl MediaElement for StubElement {
        fn load(&mut self, uri: &str) {
            self.uri = uri.to_string();
            self.time = 0.0;
            self.paused = true;
        }

        fn play(&mut self) -> MediaPlayFuture {
            if self.fail_play {
                future::ready(Err(MediaError::Decode("bad frame".into()))).boxed_local()
            } else {
                self.paused = false;
                future::ready(Ok(())).boxed_local()
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn current_time(&self) -> f64 {
            self.time
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.time = seconds;
        }

        fn duration(&self) -> f64 {
            self.duration
        }

        fn volume(&self) -> f64 {
            self.volume
        }

        fn set_volume(&mut self, volume: f64) {
            self.volume = volume;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }
    }

    #[test]
    fn tickets_are_monotonic_and_carry_index() {
        let mut adapter = TransportAdapter::new(Box::new(StubElement::default()));

        let first = adapter.play(2);
        let second = adapter.play(0);

        assert!(second.request > first.request);
        assert_eq!(first.index, 2);
        assert_eq!(second.index, 0);
        assert_eq!(adapter.take_pending().len(), 2);
        assert!(!adapter.has_pending());
    }

    #[test]
    fn pending_play_resolves_with_its_ticket() {
        let mut adapter = TransportAdapter::new(Box::new(StubElement::default()));

        let ticket = adapter.play(1);
        let outcome = block_on(adapter.take_pending().remove(0));

        assert_eq!(outcome.ticket, ticket);
        assert_eq!(outcome.result, Ok(()));
    }

    #[test]
    fn rejected_play_maps_to_start_failure() {
        let element = StubElement {
            fail_play: true,
            ..Default::default()
        };
        let mut adapter = TransportAdapter::new(Box::new(element));

        adapter.play(0);
        let outcome = block_on(adapter.take_pending().remove(0));

        assert!(matches!(
            outcome.result,
            Err(PlaybackError::PlaybackStartFailure(MediaError::Decode(_)))
        ));
    }

    #[test]
    fn unknown_durations() {
        assert_eq!(known_duration(f64::NAN), None);
        assert_eq!(known_duration(f64::INFINITY), None);
        assert_eq!(known_duration(0.0), None);
        assert_eq!(known_duration(-1.0), None);
        assert_eq!(known_duration(180.0), Some(180.0));
    }

    #[test]
    fn volume_is_clamped_before_reaching_element() {
        let mut adapter = TransportAdapter::new(Box::new(StubElement::default()));

        adapter.set_volume(1.5);
        assert_eq!(adapter.volume(), 1.0);

        adapter.set_volume(-0.2);
        assert_eq!(adapter.volume(), 0.0);
    }
}
