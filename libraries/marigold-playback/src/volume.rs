//! Volume conversions and glyph classification
//!
//! The user-facing scale is 0-100%, the transport scale is 0.0-1.0 (linear,
//! the media element applies its own curve).

use serde::{Deserialize, Serialize};

/// Glyph shown on the mute button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLevel {
    /// Muted or at zero
    Muted,

    /// Audible, at or below half volume
    Low,

    /// Above half volume
    High,
}

impl VolumeLevel {
    /// Classify an output level (0.0-1.0)
    pub fn classify(level: f64, muted: bool) -> Self {
        if muted || level <= 0.0 {
            VolumeLevel::Muted
        } else if level > 0.5 {
            VolumeLevel::High
        } else {
            VolumeLevel::Low
        }
    }
}

/// Convert a percentage to a transport level
///
/// Clamps to 0-100 first. Returns `None` for NaN, which callers treat as a
/// no-op.
pub fn percent_to_level(percent: f64) -> Option<f64> {
    if percent.is_nan() {
        return None;
    }
    Some(percent.clamp(0.0, 100.0) / 100.0)
}

/// Convert a transport level to the slider percentage (0-100)
pub fn level_to_percent(level: f64) -> u8 {
    if level.is_nan() {
        return 0;
    }
    (level.clamp(0.0, 1.0) * 100.0).round() as u8
}
