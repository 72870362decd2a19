//! Host event loop
//!
//! One current-thread task owns the controller and waits on every input
//! source at once: typed lines, media-element events, settled play requests
//! and the simulation clock. Each wake-up is handled to completion before
//! the next `select!`.

use crate::config::AppConfig;
use crate::error::Result;
use crate::input::{parse_line, Input, HELP};
use crate::media::SimulatedMedia;
use crate::session::{LoggingSession, RegisteredActions};
use futures::stream::{FuturesUnordered, StreamExt};
use marigold_core::Catalog;
use marigold_playback::{
    MediaAction, MediaEvent, PendingPlay, PlayOutcome, PlaybackController, PlaybackEvent,
    PlaybackSnapshot, PresentationSink,
};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// Whether the loop keeps running after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Step {
    Line(Option<String>),
    Media(MediaEvent),
    Settled(PlayOutcome),
    Tick(Instant),
}

pub struct TerminalPlayer {
    controller: PlaybackController,
    media: SimulatedMedia,
    media_events: mpsc::UnboundedReceiver<MediaEvent>,
    actions: Option<RegisteredActions>,
    plays: FuturesUnordered<PendingPlay>,
    tick: Duration,
}

impl TerminalPlayer {
    pub fn new(catalog: Catalog, config: &AppConfig, view: Box<dyn PresentationSink>) -> Self {
        let (media, media_events) = SimulatedMedia::new(&config.simulation);

        let mut controller = PlaybackController::new(
            catalog,
            Box::new(media.clone()),
            view,
            config.player.clone(),
        );

        let actions = if config.media_session.enabled {
            let session = LoggingSession::new();
            let registered = session.registered();
            controller = controller.with_media_session(Box::new(session));
            Some(registered)
        } else {
            tracing::info!("Media session disabled");
            None
        };

        Self {
            controller,
            media,
            media_events,
            actions,
            plays: FuturesUnordered::new(),
            tick: config.simulation.tick(),
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn media(&self) -> &SimulatedMedia {
        &self.media
    }

    // ===== Input =====

    /// Parse and apply one typed line
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }

        match parse_line(line) {
            Ok(input) => self.handle_input(input),
            Err(e) => {
                println!("{e} (type 'help' for commands)");
                Flow::Continue
            }
        }
    }

    pub fn handle_input(&mut self, input: Input) -> Flow {
        match input {
            Input::Command(command) => self.controller.dispatch(command),
            Input::Key(key) => self.controller.handle_key(key),
            Input::Media(action) => self.deliver_media_action(action),
            Input::Help => println!("{HELP}"),
            Input::Quit => return Flow::Quit,
        }
        self.after_input();
        Flow::Continue
    }

    /// Route a media key the way the OS would: only to registered actions
    fn deliver_media_action(&mut self, action: MediaAction) {
        let Some(actions) = &self.actions else {
            println!("media session disabled");
            return;
        };
        if !actions.contains(action.kind()) {
            tracing::warn!(action = ?action.kind(), "Media action not registered");
            return;
        }
        self.controller.handle_media_action(action);
    }

    // ===== Simulation =====

    /// Advance the simulated clock
    pub fn tick(&mut self, elapsed: Duration) {
        self.media.tick(elapsed);
    }

    /// Deliver all queued media events
    pub fn pump_media_events(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.media_events.try_recv() {
            self.controller.handle_media_event(event);
            delivered += 1;
        }
        self.after_input();
        delivered
    }

    /// Wait for every outstanding play request and apply its outcome
    pub async fn settle_plays(&mut self) {
        loop {
            self.collect_plays();
            let Some(outcome) = self.plays.next().await else {
                break;
            };
            self.controller.on_play_settled(outcome);
            self.report_events();
        }
    }

    fn collect_plays(&mut self) {
        self.plays.extend(self.controller.take_pending_plays());
    }

    fn after_input(&mut self) {
        self.collect_plays();
        self.report_events();
    }

    fn report_events(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                PlaybackEvent::StateChanged { status } => {
                    tracing::debug!(?status, "Playback status changed");
                }
                PlaybackEvent::TrackChanged {
                    index,
                    previous_index,
                } => tracing::debug!(index, ?previous_index, "Track changed"),
                PlaybackEvent::VolumeChanged { volume, is_muted } => {
                    tracing::debug!(volume, is_muted, "Volume changed");
                }
                PlaybackEvent::PositionChanged { position, duration } => {
                    tracing::trace!(position, ?duration, "Position");
                }
                PlaybackEvent::Error { message } => println!("! {message}"),
            }
        }
    }

    // ===== Event Loop =====

    /// Run until `quit` or end of input, returning the final state
    pub async fn run<R>(mut self, input: R) -> Result<PlaybackSnapshot>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_tick = Instant::now();

        tracing::info!(
            tracks = self.controller.catalog().len(),
            "Player ready, type 'help' for commands"
        );

        loop {
            self.collect_plays();

            let step = tokio::select! {
                line = lines.next_line() => Step::Line(line?),
                Some(event) = self.media_events.recv() => Step::Media(event),
                Some(outcome) = self.plays.next(), if !self.plays.is_empty() => Step::Settled(outcome),
                now = ticker.tick() => Step::Tick(now),
            };

            match step {
                Step::Line(None) => {
                    tracing::debug!("Input closed");
                    break;
                }
                Step::Line(Some(line)) => {
                    if self.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                Step::Media(event) => self.controller.handle_media_event(event),
                Step::Settled(outcome) => self.controller.on_play_settled(outcome),
                Step::Tick(now) => {
                    self.media.tick(now.saturating_duration_since(last_tick));
                    last_tick = now;
                }
            }

            self.report_events();
        }

        Ok(self.controller.snapshot())
    }
}
