//! Playback controller
//!
//! Owns the single [`PlaybackState`] and is the only place it changes. Every
//! input source (buttons, keyboard, sliders, media-element events, OS media
//! keys) ends up as a method call here, and every display (view, OS metadata)
//! is updated from here.
//!
//! # Asynchronous play
//!
//! Starting playback is the one asynchronous operation. The controller issues
//! the request through the [`TransportAdapter`], records the returned
//! [`PlayTicket`] as the in-flight request and returns. The host polls the
//! pending future and calls [`PlaybackController::on_play_settled`] with the
//! outcome. Selecting another track or pausing replaces or clears the
//! in-flight ticket, so an outcome that arrives late no longer matches and is
//! dropped without touching state.
//!
//! There is no timeout: a play request that never settles leaves the status
//! at `Loading`.

use crate::error::PlaybackError;
use crate::events::PlaybackEvent;
use crate::input::{Key, KeyBindings, PlayerCommand};
use crate::progress::ProgressSynchronizer;
use crate::session::{
    resolve_seek_offset, seek_backward_target, seek_forward_target, MediaAction, MediaSession,
    OsTransportBridge, SessionPlaybackState,
};
use crate::transport::{MediaElement, MediaEvent, PendingPlay, PlayOutcome, PlayTicket, TransportAdapter};
use crate::types::{PlaybackSnapshot, PlaybackState, PlaybackStatus, PlayerConfig, DEFAULT_VOLUME};
use crate::view::PresentationSink;
use crate::volume::{level_to_percent, percent_to_level, VolumeLevel};
use marigold_core::{Catalog, Track};

const PLACEHOLDER_TITLE: &str = "Select a track to play";
const PLACEHOLDER_ARTIST: &str = "Artist";

/// The play request currently allowed to change state
#[derive(Debug, Clone, Copy)]
struct InFlightPlay {
    ticket: PlayTicket,
    /// Status to return to if the request fails
    fallback: PlaybackStatus,
}

/// Playback state machine
///
/// Single-threaded: collaborators are plain trait objects and every method
/// runs to completion before the next one starts.
pub struct PlaybackController {
    catalog: Catalog,
    state: PlaybackState,
    config: PlayerConfig,
    bindings: KeyBindings,

    // Collaborators
    transport: TransportAdapter,
    view: Box<dyn PresentationSink>,
    bridge: Option<OsTransportBridge>,

    in_flight: Option<InFlightPlay>,

    // Event queue for observers
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller and draw the initial view
    ///
    /// Nothing is selected and the transport volume is set to the configured
    /// initial level.
    pub fn new(
        catalog: Catalog,
        element: Box<dyn MediaElement>,
        view: Box<dyn PresentationSink>,
        config: PlayerConfig,
    ) -> Self {
        let mut controller = Self {
            catalog,
            state: PlaybackState::new(config.initial_level()),
            bindings: KeyBindings::new(&config),
            config,
            transport: TransportAdapter::new(element),
            view,
            bridge: None,
            in_flight: None,
            pending_events: Vec::new(),
        };
        controller.render_initial();
        controller
    }

    /// Attach the OS media-control surface
    ///
    /// Registers the six transport actions. Without a session the controller
    /// behaves the same, it just has nobody to mirror metadata to.
    #[must_use]
    pub fn with_media_session(mut self, session: Box<dyn MediaSession>) -> Self {
        self.bridge = Some(OsTransportBridge::new(session, &self.config));
        if let Some(track) = self.current_track().cloned() {
            self.publish_metadata(&track);
        }
        self
    }

    fn render_initial(&mut self) {
        self.transport.set_volume(self.state.volume);

        self.view.render_playlist(self.catalog.tracks());
        self.view
            .render_track_info(PLACEHOLDER_TITLE, PLACEHOLDER_ARTIST, None);
        self.view.render_playlist_selection(None);
        self.render_progress_reset();
        self.view.render_transport_glyph(false);
        self.render_volume();
    }

    // ===== Input Dispatch =====

    /// Handle a command from the user
    ///
    /// Every command counts as a user gesture, so the first one unlocks
    /// automatic playback on selection.
    pub fn dispatch(&mut self, command: PlayerCommand) {
        tracing::trace!(?command, "Dispatching command");
        self.grant_user_gesture();

        match command {
            PlayerCommand::SelectTrack(index) => self.select_track(index),
            PlayerCommand::TogglePlayPause => self.toggle_play_pause(),
            PlayerCommand::Previous => self.previous(),
            PlayerCommand::Next => self.next(),
            PlayerCommand::SeekToPercent(percent) => self.seek(percent),
            PlayerCommand::SetVolume(percent) => self.set_volume(percent),
            PlayerCommand::ToggleMute => self.toggle_mute(),
            PlayerCommand::NudgeVolume(delta) => self.nudge_volume(delta),
            PlayerCommand::NudgeSeek(delta) => self.nudge_seek(delta),
            PlayerCommand::Gesture => {}
        }
    }

    /// Handle a key press through the configured bindings
    pub fn handle_key(&mut self, key: Key) {
        let command = self.bindings.command_for(key);
        self.dispatch(command);
    }

    /// Record that the user has interacted with the player
    pub fn grant_user_gesture(&mut self) {
        if !self.state.has_user_gesture {
            self.state.has_user_gesture = true;
            tracing::debug!("User gesture granted, selections now start playback");
        }
    }

    // ===== Playback Control =====

    /// Select the track at `index`
    ///
    /// Out-of-range indices are ignored. Track info, playlist highlight and
    /// OS metadata update immediately. Playback starts only once the user
    /// has interacted; before that the track stays loaded in `Loading`.
    pub fn select_track(&mut self, index: usize) {
        if self.load_track(index) && self.state.has_user_gesture {
            self.start_playback();
        }
    }

    /// Play/pause button
    ///
    /// With nothing selected this selects the first track. Otherwise the
    /// media element's own paused flag decides, which keeps the button
    /// correct after the OS paused playback behind our back.
    pub fn toggle_play_pause(&mut self) {
        self.grant_user_gesture();

        if self.state.current_index.is_none() {
            self.select_track(0);
            return;
        }

        if self.transport.is_paused() {
            self.start_playback();
        } else {
            self.pause();
        }
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        match self.state.current_index {
            None => {
                if self.load_track(0) {
                    self.start_playback();
                }
            }
            Some(_) if self.transport.is_paused() => self.start_playback(),
            Some(_) => tracing::debug!("Already playing"),
        }
    }

    /// Pause playback
    ///
    /// Also abandons any play request still in flight.
    pub fn pause(&mut self) {
        if self.state.current_index.is_none() {
            return;
        }

        if let Some(abandoned) = self.in_flight.take() {
            tracing::debug!(
                request = abandoned.ticket.request,
                "Pause supersedes pending play request"
            );
        }

        self.transport.pause();
        self.set_status(PlaybackStatus::Paused);
    }

    /// Skip to the next track, wrapping to the first
    pub fn next(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            tracing::debug!("Catalog is empty, ignoring next");
            return;
        }

        match self.state.current_index {
            None => self.select_track(0),
            Some(index) => self.skip_to((index + 1) % len),
        }
    }

    /// Skip to the previous track, wrapping to the last
    pub fn previous(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            tracing::debug!("Catalog is empty, ignoring previous");
            return;
        }

        match self.state.current_index {
            None => self.select_track(0),
            Some(index) => self.skip_to((index + len - 1) % len),
        }
    }

    /// Skipping always intends playback, whatever the current status
    fn skip_to(&mut self, index: usize) {
        if self.load_track(index) {
            self.start_playback();
        }
    }

    /// Apply the outcome of a play request
    ///
    /// Outcomes for a request that is no longer in flight, or for a track
    /// that is no longer selected, are dropped silently.
    pub fn on_play_settled(&mut self, outcome: PlayOutcome) {
        let in_flight = match self.in_flight {
            Some(current)
                if current.ticket == outcome.ticket
                    && self.state.current_index == Some(outcome.ticket.index) =>
            {
                current
            }
            _ => {
                tracing::debug!(
                    request = outcome.ticket.request,
                    index = outcome.ticket.index,
                    "Discarding stale play resolution"
                );
                return;
            }
        };
        self.in_flight = None;

        match outcome.result {
            Ok(()) => self.set_status(PlaybackStatus::Playing),
            Err(e) => {
                tracing::warn!(index = outcome.ticket.index, error = %e, "Failed to start playback");
                self.set_status(in_flight.fallback);
                self.emit_error(&e);
            }
        }
    }

    /// Hand over play requests issued since the last call
    ///
    /// The host must poll each one and pass its outcome to
    /// [`on_play_settled`](Self::on_play_settled).
    pub fn take_pending_plays(&mut self) -> Vec<PendingPlay> {
        self.transport.take_pending()
    }

    // ===== Seek =====

    /// Seek to a percentage (0-100) of the track
    ///
    /// Ignored while the duration is unknown; out-of-range percentages are
    /// clamped.
    pub fn seek(&mut self, percent: f64) {
        if percent.is_nan() {
            tracing::debug!("Ignoring seek to NaN percent");
            return;
        }
        let Some(duration) = self.transport.duration() else {
            let rejected = PlaybackError::SeekRejected("duration unknown".to_string());
            tracing::debug!(error = %rejected, "Ignoring seek");
            return;
        };

        let target = percent.clamp(0.0, 100.0) / 100.0 * duration;
        self.transport.set_current_time(target);
    }

    /// Move the position by `delta` seconds, staying inside the track
    pub fn nudge_seek(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let Some(duration) = self.transport.duration() else {
            tracing::debug!("Ignoring seek nudge, duration unknown");
            return;
        };

        let target = (self.transport.current_time() + delta).clamp(0.0, duration);
        self.transport.set_current_time(target);
    }

    // ===== Volume =====

    /// Set volume from a percentage (0-100)
    ///
    /// Zero mutes; any other level unmutes.
    pub fn set_volume(&mut self, percent: f64) {
        let Some(level) = percent_to_level(percent) else {
            tracing::debug!("Ignoring volume of NaN percent");
            return;
        };

        self.transport.set_volume(level);
        self.state.volume = level;
        self.state.is_muted = level == 0.0;
        self.volume_changed();
    }

    /// Mute, or restore the level saved when muting
    pub fn toggle_mute(&mut self) {
        if self.state.is_muted {
            let mut restored = self.state.previous_volume;
            if restored <= 0.0 {
                restored = DEFAULT_VOLUME;
            }
            self.transport.set_volume(restored);
            self.state.volume = restored;
            self.state.is_muted = false;
        } else {
            self.state.previous_volume = self.transport.volume();
            self.transport.set_volume(0.0);
            self.state.is_muted = true;
        }
        self.volume_changed();
    }

    /// Change volume by `delta` percent relative to the slider position
    pub fn nudge_volume(&mut self, delta: f64) {
        let base = f64::from(self.slider_percent());
        self.set_volume(base + delta);
    }

    fn slider_percent(&self) -> u8 {
        if self.state.is_muted {
            0
        } else {
            level_to_percent(self.state.volume)
        }
    }

    fn volume_changed(&mut self) {
        self.render_volume();
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.state.volume,
            is_muted: self.state.is_muted,
        });
    }

    fn render_volume(&mut self) {
        self.view
            .render_volume_glyph(VolumeLevel::classify(self.state.volume, self.state.is_muted));
        let percent = self.slider_percent();
        self.view.render_volume_slider(percent);
    }

    // ===== Transport Events =====

    /// React to a lifecycle event from the media element
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Started => {
                if self.state.current_index.is_some() {
                    self.set_status(PlaybackStatus::Playing);
                }
            }
            MediaEvent::Paused => {
                if self.state.status == PlaybackStatus::Playing {
                    self.set_status(PlaybackStatus::Paused);
                }
            }
            MediaEvent::TimeChanged | MediaEvent::MetadataReady => self.sync_progress(),
            MediaEvent::Ended => {
                tracing::info!(index = ?self.state.current_index, "Track ended, advancing");
                self.next();
            }
            MediaEvent::Error(message) => {
                let error = PlaybackError::Media(message);
                tracing::warn!(error = %error, "Media element reported an error");
                self.emit_error(&error);
            }
        }
    }

    fn sync_progress(&mut self) {
        let position = self.transport.current_time();
        self.state.position = position;
        self.state.duration = self.transport.duration();

        if let Some(update) = ProgressSynchronizer::compute(position, self.transport.raw_duration()) {
            self.view
                .render_progress(update.fraction, &update.current_label, &update.total_label);
        }

        self.pending_events.push(PlaybackEvent::PositionChanged {
            position,
            duration: self.state.duration,
        });
    }

    // ===== OS Media Actions =====

    /// React to an action delivered by the OS media surface
    pub fn handle_media_action(&mut self, action: MediaAction) {
        tracing::debug!(action = ?action.kind(), "Media session action");
        let default_offset = self.config.media_session_seek_offset_secs;

        match action {
            MediaAction::Play => self.play(),
            MediaAction::Pause => self.pause(),
            MediaAction::PreviousTrack => self.previous(),
            MediaAction::NextTrack => self.next(),
            MediaAction::SeekBackward { offset } => {
                let offset = resolve_seek_offset(offset, default_offset);
                let target = seek_backward_target(self.transport.current_time(), offset);
                self.transport.set_current_time(target);
            }
            MediaAction::SeekForward { offset } => {
                let offset = resolve_seek_offset(offset, default_offset);
                let target = seek_forward_target(
                    self.transport.current_time(),
                    self.transport.duration(),
                    offset,
                );
                self.transport.set_current_time(target);
            }
        }
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Owned copy of the state and the selected track
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state.clone(),
            track: self.current_track().cloned(),
        }
    }

    /// Selected track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_index
            .and_then(|index| self.catalog.get(index))
    }

    /// The catalog being played
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Controller configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Whether an OS media surface is attached
    pub fn has_media_session(&self) -> bool {
        self.bridge.is_some()
    }

    /// Whether a play request is waiting to settle
    pub fn has_play_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// Load the track at `index` without starting it
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range.
    fn load_track(&mut self, index: usize) -> bool {
        let Some(track) = self.catalog.get(index).cloned() else {
            tracing::debug!(error = %PlaybackError::InvalidIndex(index), "Ignoring selection");
            return false;
        };

        let previous_index = self.state.current_index.replace(index);
        self.in_flight = None;

        self.transport.load(&track.media_uri);
        self.state.position = 0.0;
        self.state.duration = None;

        self.view
            .render_track_info(&track.title, &track.artist, track.artwork());
        self.view.render_playlist_selection(Some(index));
        self.render_progress_reset();
        self.publish_metadata(&track);

        tracing::info!(index, title = %track.title, artist = %track.artist, "Track selected");
        self.pending_events.push(PlaybackEvent::TrackChanged {
            index,
            previous_index,
        });
        self.set_status(PlaybackStatus::Loading);
        true
    }

    /// Issue a play request for the selected track
    fn start_playback(&mut self) {
        let Some(index) = self.state.current_index else {
            return;
        };

        // A cached `Playing` may be stale if the element paused without an event
        let fallback = match self.state.status {
            PlaybackStatus::Idle | PlaybackStatus::Loading => PlaybackStatus::Paused,
            PlaybackStatus::Playing if self.transport.is_paused() => PlaybackStatus::Paused,
            status => status,
        };

        self.set_status(PlaybackStatus::Loading);
        let ticket = self.transport.play(index);
        self.in_flight = Some(InFlightPlay { ticket, fallback });
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.state.status == status {
            return;
        }

        self.state.status = status;
        self.view.render_transport_glyph(status.is_playing());

        let session_state = match status {
            PlaybackStatus::Playing => Some(SessionPlaybackState::Playing),
            PlaybackStatus::Paused => Some(SessionPlaybackState::Paused),
            PlaybackStatus::Idle | PlaybackStatus::Loading => None,
        };
        if let (Some(bridge), Some(session_state)) = (self.bridge.as_mut(), session_state) {
            bridge.publish_playback_state(session_state);
        }

        self.pending_events
            .push(PlaybackEvent::StateChanged { status });
    }

    fn publish_metadata(&mut self, track: &Track) {
        let Some(bridge) = self.bridge.as_mut() else {
            return;
        };
        if let Err(e) = bridge.publish_metadata(track) {
            tracing::warn!(error = %e, "Media session metadata update failed");
            self.emit_error(&e);
        }
    }

    fn render_progress_reset(&mut self) {
        let reset = ProgressSynchronizer::reset();
        self.view
            .render_progress(reset.fraction, &reset.current_label, &reset.total_label);
    }

    fn emit_error(&mut self, error: &PlaybackError) {
        self.pending_events.push(PlaybackEvent::Error {
            message: error.to_string(),
        });
    }
}
