//! Shared fakes for playback integration tests
//!
//! Each fake keeps its state behind an `Rc<RefCell<_>>` so the test can keep
//! a handle after the controller takes ownership of the boxed collaborator.

#![allow(dead_code)]

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::future::{self, FutureExt};
use marigold_core::{Catalog, Track};
use marigold_playback::{
    MediaActionKind, MediaElement, MediaError, MediaMetadata, MediaPlayFuture, MediaSession,
    PendingPlay, PlaybackController, PlayerConfig, PresentationSink, SessionError,
    SessionPlaybackState, VolumeLevel,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// ===== Catalog =====

/// Catalog of `n` numbered tracks, each with artwork
pub fn numbered_catalog(n: usize) -> Catalog {
    Catalog::new(
        (0..n)
            .map(|i| {
                Track::new(
                    format!("Track {i}"),
                    format!("Artist {i}"),
                    format!("https://cdn.test/track-{i}.mp3"),
                )
                .with_artwork(format!("https://cdn.test/cover-{i}.png"))
            })
            .collect(),
    )
}

// ===== Media Element =====

/// How the fake answers `play()`
#[derive(Debug, Clone, PartialEq)]
pub enum PlayMode {
    /// Resolve successfully at once
    Resolve,
    /// Reject at once
    Reject(MediaError),
    /// Stay pending until the test resolves it
    Manual,
}

pub struct MediaState {
    pub uri: Option<String>,
    pub loads: Vec<String>,
    pub play_calls: usize,
    pub time: f64,
    pub duration: f64,
    pub volume: f64,
    pub paused: bool,
    pub mode: PlayMode,
    waiting: VecDeque<oneshot::Sender<Result<(), MediaError>>>,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            uri: None,
            loads: Vec::new(),
            play_calls: 0,
            time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            paused: true,
            mode: PlayMode::Resolve,
            waiting: VecDeque::new(),
        }
    }
}

impl MediaState {
    /// Resolve the oldest manual play request
    pub fn resolve_next(&mut self, result: Result<(), MediaError>) {
        let tx = self.waiting.pop_front().expect("no play request waiting");
        let _ = tx.send(result);
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }
}

pub struct FakeMedia(pub Rc<RefCell<MediaState>>);

impl MediaElement for FakeMedia {
    fn load(&mut self, uri: &str) {
        let mut state = self.0.borrow_mut();
        state.uri = Some(uri.to_string());
        state.loads.push(uri.to_string());
        state.time = 0.0;
        state.duration = f64::NAN;
        state.paused = true;
    }

    fn play(&mut self) -> MediaPlayFuture {
        let mut state = self.0.borrow_mut();
        state.play_calls += 1;
        state.paused = false;

        match state.mode.clone() {
            PlayMode::Resolve => future::ready(Ok(())).boxed_local(),
            PlayMode::Reject(error) => {
                state.paused = true;
                future::ready(Err(error)).boxed_local()
            }
            PlayMode::Manual => {
                let (tx, rx) = oneshot::channel();
                state.waiting.push_back(tx);
                rx.map(|answer| answer.unwrap_or(Err(MediaError::Aborted)))
                    .boxed_local()
            }
        }
    }

    fn pause(&mut self) {
        self.0.borrow_mut().paused = true;
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.0.borrow_mut().time = seconds;
    }

    fn duration(&self) -> f64 {
        self.0.borrow().duration
    }

    fn volume(&self) -> f64 {
        self.0.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.0.borrow_mut().volume = volume;
    }

    fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }
}

// ===== View =====

#[derive(Debug, Default)]
pub struct ViewLog {
    pub playlist: Vec<String>,
    pub track_info: Option<(String, String, Option<String>)>,
    pub progress: Option<(f64, String, String)>,
    pub progress_renders: usize,
    pub selection: Option<usize>,
    pub playing_glyph: bool,
    pub volume_glyph: Option<VolumeLevel>,
    pub slider: Option<u8>,
}

pub struct RecordingView(pub Rc<RefCell<ViewLog>>);

impl PresentationSink for RecordingView {
    fn render_playlist(&mut self, tracks: &[Track]) {
        self.0.borrow_mut().playlist = tracks.iter().map(|t| t.title.clone()).collect();
    }

    fn render_track_info(&mut self, title: &str, artist: &str, artwork_uri: Option<&str>) {
        self.0.borrow_mut().track_info = Some((
            title.to_string(),
            artist.to_string(),
            artwork_uri.map(str::to_string),
        ));
    }

    fn render_progress(&mut self, fraction: f64, current_label: &str, total_label: &str) {
        let mut log = self.0.borrow_mut();
        log.progress = Some((fraction, current_label.to_string(), total_label.to_string()));
        log.progress_renders += 1;
    }

    fn render_playlist_selection(&mut self, index: Option<usize>) {
        self.0.borrow_mut().selection = index;
    }

    fn render_transport_glyph(&mut self, is_playing: bool) {
        self.0.borrow_mut().playing_glyph = is_playing;
    }

    fn render_volume_glyph(&mut self, level: VolumeLevel) {
        self.0.borrow_mut().volume_glyph = Some(level);
    }

    fn render_volume_slider(&mut self, percent: u8) {
        self.0.borrow_mut().slider = Some(percent);
    }
}

// ===== Media Session =====

#[derive(Debug, Default)]
pub struct SessionLog {
    pub registered: Vec<MediaActionKind>,
    pub metadata: Vec<MediaMetadata>,
    pub states: Vec<SessionPlaybackState>,
    pub reject_metadata: bool,
}

pub struct RecordingSession(pub Rc<RefCell<SessionLog>>);

impl MediaSession for RecordingSession {
    fn register_action(&mut self, action: MediaActionKind) -> Result<(), SessionError> {
        self.0.borrow_mut().registered.push(action);
        Ok(())
    }

    fn set_metadata(&mut self, metadata: MediaMetadata) -> Result<(), SessionError> {
        let mut log = self.0.borrow_mut();
        if log.reject_metadata {
            return Err(SessionError::Rejected("artwork fetch blocked".into()));
        }
        log.metadata.push(metadata);
        Ok(())
    }

    fn set_playback_state(&mut self, state: SessionPlaybackState) -> Result<(), SessionError> {
        self.0.borrow_mut().states.push(state);
        Ok(())
    }
}

// ===== Harness =====

pub struct Harness {
    pub player: PlaybackController,
    pub media: Rc<RefCell<MediaState>>,
    pub view: Rc<RefCell<ViewLog>>,
}

impl Harness {
    pub fn new(tracks: usize) -> Self {
        Self::with_config(tracks, PlayerConfig::default())
    }

    pub fn with_config(tracks: usize, config: PlayerConfig) -> Self {
        let media = Rc::new(RefCell::new(MediaState::default()));
        let view = Rc::new(RefCell::new(ViewLog::default()));

        let player = PlaybackController::new(
            numbered_catalog(tracks),
            Box::new(FakeMedia(Rc::clone(&media))),
            Box::new(RecordingView(Rc::clone(&view))),
            config,
        );

        Self {
            player,
            media,
            view,
        }
    }

    /// Attach a recording media session and return its log
    pub fn attach_session(self) -> (Self, Rc<RefCell<SessionLog>>) {
        self.attach_session_with(SessionLog::default())
    }

    /// Attach a recording media session seeded with `log`
    pub fn attach_session_with(self, log: SessionLog) -> (Self, Rc<RefCell<SessionLog>>) {
        let log = Rc::new(RefCell::new(log));
        let Self {
            player,
            media,
            view,
        } = self;
        let player = player.with_media_session(Box::new(RecordingSession(Rc::clone(&log))));
        (
            Self {
                player,
                media,
                view,
            },
            log,
        )
    }

    pub fn set_mode(&self, mode: PlayMode) {
        self.media.borrow_mut().mode = mode;
    }

    /// Make the current source report a known length
    pub fn set_duration(&self, seconds: f64) {
        self.media.borrow_mut().duration = seconds;
    }

    pub fn set_time(&self, seconds: f64) {
        self.media.borrow_mut().time = seconds;
    }

    pub fn take_plays(&mut self) -> Vec<PendingPlay> {
        self.player.take_pending_plays()
    }

    /// Poll every pending play to completion and report each outcome
    ///
    /// Only safe when no request is in `PlayMode::Manual` and unresolved.
    pub fn settle(&mut self) {
        for pending in self.take_plays() {
            let outcome = block_on(pending);
            self.player.on_play_settled(outcome);
        }
    }

    /// Settle a previously taken play request
    pub fn settle_one(&mut self, pending: PendingPlay) {
        let outcome = block_on(pending);
        self.player.on_play_settled(outcome);
    }
}
