//! User input surface
//!
//! Every input device (buttons, playlist rows, sliders, keyboard) is reduced
//! to one [`PlayerCommand`] before it reaches the controller. The controller
//! handles commands in one place,
//! [`PlaybackController::dispatch`](crate::PlaybackController::dispatch), and
//! never learns which device produced them.

use crate::types::PlayerConfig;
use serde::{Deserialize, Serialize};

/// A command from the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Playlist row clicked
    SelectTrack(usize),
    /// Play/pause button
    TogglePlayPause,
    /// Previous button
    Previous,
    /// Next button
    Next,
    /// Progress bar clicked at a percentage (0-100)
    SeekToPercent(f64),
    /// Volume slider moved to a percentage (0-100)
    SetVolume(f64),
    /// Mute button
    ToggleMute,
    /// Relative volume change in percent
    NudgeVolume(f64),
    /// Relative seek in seconds
    NudgeSeek(f64),
    /// Any other interaction with the page (grants the autoplay gesture)
    Gesture,
}

/// Keys with default bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// Maps keys to commands
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    seek_step: f64,
    volume_step: f64,
}

impl KeyBindings {
    /// Bindings using the configured step sizes
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            seek_step: config.seek_step_secs,
            volume_step: f64::from(config.volume_step),
        }
    }

    /// Command bound to `key`
    pub fn command_for(&self, key: Key) -> PlayerCommand {
        match key {
            Key::Space => PlayerCommand::TogglePlayPause,
            Key::ArrowLeft => PlayerCommand::NudgeSeek(-self.seek_step),
            Key::ArrowRight => PlayerCommand::NudgeSeek(self.seek_step),
            Key::ArrowUp => PlayerCommand::NudgeVolume(self.volume_step),
            Key::ArrowDown => PlayerCommand::NudgeVolume(-self.volume_step),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}
