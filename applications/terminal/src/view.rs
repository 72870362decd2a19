//! Console presentation sink
//!
//! Keeps a model of what a graphical player would show and prints a one-line
//! status whenever something visible changes. Progress only reprints when the
//! elapsed label changes, so sub-second ticks stay quiet.

use marigold_core::Track;
use marigold_playback::{PresentationSink, VolumeLevel};
use std::io::Write;

const BAR_WIDTH: usize = 20;

/// Everything currently on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub playlist: Vec<String>,
    pub title: String,
    pub artist: String,
    pub artwork: Option<String>,
    pub fraction: f64,
    pub current_label: String,
    pub total_label: String,
    pub selection: Option<usize>,
    pub playing: bool,
    pub volume_level: Option<VolumeLevel>,
    pub volume_percent: u8,
}

impl Screen {
    /// One-line rendering, e.g. `|| Sunny - Benjamin Tissot [#####-----] 0:45 / 3:00 vol )) 50%`
    pub fn status_line(&self) -> String {
        let glyph = if self.playing { "||" } else { "> " };
        let volume = match self.volume_level {
            Some(VolumeLevel::Muted) | None => "x ",
            Some(VolumeLevel::Low) => ") ",
            Some(VolumeLevel::High) => "))",
        };

        format!(
            "{glyph} {} - {} {} {} / {} vol {volume} {}%",
            self.title,
            self.artist,
            progress_bar(self.fraction),
            self.current_label,
            self.total_label,
            self.volume_percent
        )
    }
}

/// `[####----]` with `BAR_WIDTH` cells
pub fn progress_bar(fraction: f64) -> String {
    let filled = if fraction.is_finite() {
        (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Prints the player to any writer
pub struct ConsoleView<W: Write> {
    out: W,
    screen: Screen,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            screen: Screen::default(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "Failed to write to console");
        }
    }

    fn print_status(&mut self) {
        let line = self.screen.status_line();
        self.print(&line);
    }
}

impl<W: Write> PresentationSink for ConsoleView<W> {
    fn render_playlist(&mut self, tracks: &[Track]) {
        self.screen.playlist = tracks.iter().map(|t| t.title.clone()).collect();

        let lines: Vec<String> = tracks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("  {}. {} - {}", i + 1, t.title, t.artist))
            .collect();
        self.print("Playlist:");
        for line in lines {
            self.print(&line);
        }
    }

    fn render_track_info(&mut self, title: &str, artist: &str, artwork_uri: Option<&str>) {
        self.screen.title = title.to_string();
        self.screen.artist = artist.to_string();
        self.screen.artwork = artwork_uri.map(str::to_string);
        self.print_status();
    }

    fn render_progress(&mut self, fraction: f64, current_label: &str, total_label: &str) {
        let changed =
            self.screen.current_label != current_label || self.screen.total_label != total_label;
        self.screen.fraction = fraction;
        self.screen.current_label = current_label.to_string();
        self.screen.total_label = total_label.to_string();
        if changed {
            self.print_status();
        }
    }

    fn render_playlist_selection(&mut self, index: Option<usize>) {
        self.screen.selection = index;
    }

    fn render_transport_glyph(&mut self, is_playing: bool) {
        if self.screen.playing != is_playing {
            self.screen.playing = is_playing;
            self.print_status();
        }
    }

    fn render_volume_glyph(&mut self, level: VolumeLevel) {
        self.screen.volume_level = Some(level);
    }

    fn render_volume_slider(&mut self, percent: u8) {
        let changed = self.screen.volume_percent != percent;
        self.screen.volume_percent = percent;
        if changed {
            self.print_status();
        }
    }
}
