//! Simulated media element
//!
//! Stands in for an audio decoder. Time only moves when the driver calls
//! [`SimulatedMedia::tick`], which keeps the terminal host deterministic and
//! lets tests run without real audio.

use crate::config::SimulationSettings;
use futures::future::{self, FutureExt};
use marigold_playback::{MediaElement, MediaError, MediaEvent, MediaPlayFuture};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
struct SimState {
    uri: Option<String>,
    /// Bumped on every load; a play request from an older load is aborted
    generation: u64,
    time: f64,
    duration: f64,
    metadata_ready: bool,
    volume: f64,
    paused: bool,
    playing: bool,
}

/// Media element driven by simulated ticks
///
/// Cloning yields another handle to the same element.
#[derive(Clone)]
pub struct SimulatedMedia {
    state: Rc<RefCell<SimState>>,
    events: mpsc::UnboundedSender<MediaEvent>,
    track_length: f64,
    play_latency: Duration,
    failing_uris: Rc<[String]>,
}

impl SimulatedMedia {
    /// Create an element and the receiver for its lifecycle events
    pub fn new(settings: &SimulationSettings) -> (Self, mpsc::UnboundedReceiver<MediaEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let media = Self {
            state: Rc::new(RefCell::new(SimState {
                uri: None,
                generation: 0,
                time: 0.0,
                duration: f64::NAN,
                metadata_ready: false,
                volume: 1.0,
                paused: true,
                playing: false,
            })),
            events,
            track_length: settings.track_length_secs,
            play_latency: settings.play_latency(),
            failing_uris: settings.failing_uris.clone().into(),
        };
        (media, rx)
    }

    /// Advance simulated time by `elapsed`
    ///
    /// The first tick after a load makes the duration known. Later ticks move
    /// the position while playing and end the track at its duration.
    pub fn tick(&self, elapsed: Duration) {
        let mut state = self.state.borrow_mut();
        if state.uri.is_none() {
            return;
        }

        if !state.metadata_ready {
            state.metadata_ready = true;
            state.duration = self.track_length;
            drop(state);
            self.emit(MediaEvent::MetadataReady);
            return;
        }

        if !state.playing {
            return;
        }

        state.time = (state.time + elapsed.as_secs_f64()).min(state.duration);
        let ended = state.time >= state.duration;
        if ended {
            state.playing = false;
            state.paused = true;
        }
        drop(state);

        self.emit(MediaEvent::TimeChanged);
        if ended {
            self.emit(MediaEvent::Paused);
            self.emit(MediaEvent::Ended);
        }
    }

    /// Source currently loaded
    pub fn uri(&self) -> Option<String> {
        self.state.borrow().uri.clone()
    }

    /// Whether audio is actually advancing
    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    /// Report an element failure, as a network drop would
    pub fn fail(&self, message: &str) {
        self.emit(MediaEvent::Error(message.to_string()));
    }

    fn emit(&self, event: MediaEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("Media event receiver dropped");
        }
    }

    fn refuses(&self, uri: &str) -> bool {
        self.failing_uris
            .iter()
            .any(|fragment| !fragment.is_empty() && uri.contains(fragment.as_str()))
    }
}

impl MediaElement for SimulatedMedia {
    fn load(&mut self, uri: &str) {
        let mut state = self.state.borrow_mut();
        state.uri = Some(uri.to_string());
        state.generation += 1;
        state.time = 0.0;
        state.duration = f64::NAN;
        state.metadata_ready = false;
        state.paused = true;
        state.playing = false;
    }

    fn play(&mut self) -> MediaPlayFuture {
        let (generation, refused) = {
            let mut state = self.state.borrow_mut();
            let Some(uri) = state.uri.clone() else {
                return future::ready(Err(MediaError::Other("no source loaded".to_string())))
                    .boxed_local();
            };
            state.paused = false;
            (state.generation, self.refuses(&uri).then_some(uri))
        };

        let state = Rc::clone(&self.state);
        let latency = self.play_latency;

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let mut state = state.borrow_mut();
            if state.generation != generation || state.paused {
                return Err(MediaError::Aborted);
            }
            if let Some(uri) = refused {
                state.paused = true;
                return Err(MediaError::Decode(format!("cannot decode {uri}")));
            }

            state.playing = true;
            Ok(())
        }
        .boxed_local()
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.paused = true;
        state.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().time
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        let upper = if state.duration.is_finite() {
            state.duration
        } else {
            0.0
        };
        state.time = seconds.clamp(0.0, upper.max(0.0));
        drop(state);
        self.emit(MediaEvent::TimeChanged);
    }

    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }
}
