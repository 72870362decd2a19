//! Presentation sink
//!
//! The view is an external collaborator. The controller pushes plain data to
//! it and never reads anything back, so any UI (DOM, terminal, native
//! widgets) can sit behind this trait.

use crate::volume::VolumeLevel;
use marigold_core::Track;

/// Receives rendering instructions from the playback controller
pub trait PresentationSink {
    /// Draw the playlist rows (once, at startup)
    fn render_playlist(&mut self, tracks: &[Track]);

    /// Show title, artist and cover art of the selected track
    fn render_track_info(&mut self, title: &str, artist: &str, artwork_uri: Option<&str>);

    /// Redraw the progress bar and time labels
    fn render_progress(&mut self, fraction: f64, current_label: &str, total_label: &str);

    /// Highlight the selected playlist row
    fn render_playlist_selection(&mut self, index: Option<usize>);

    /// Show the pause glyph when playing, the play glyph otherwise
    fn render_transport_glyph(&mut self, is_playing: bool);

    /// Show the mute button glyph
    fn render_volume_glyph(&mut self, level: VolumeLevel);

    /// Move the volume slider (0-100)
    fn render_volume_slider(&mut self, percent: u8);
}

/// A sink that draws nothing, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn render_playlist(&mut self, _tracks: &[Track]) {}

    fn render_track_info(&mut self, _title: &str, _artist: &str, _artwork_uri: Option<&str>) {}

    fn render_progress(&mut self, _fraction: f64, _current_label: &str, _total_label: &str) {}

    fn render_playlist_selection(&mut self, _index: Option<usize>) {}

    fn render_transport_glyph(&mut self, _is_playing: bool) {}

    fn render_volume_glyph(&mut self, _level: VolumeLevel) {}

    fn render_volume_slider(&mut self, _percent: u8) {}
}
