//! Progress synchronization
//!
//! Derives the progress bar fill and the two time labels from what the
//! transport reports. Runs only when the transport emits `TimeChanged` or
//! `MetadataReady`, so it follows the element's native update cadence and
//! keeps no state of its own.

use serde::{Deserialize, Serialize};

/// What the view needs to redraw the progress bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Fill fraction (0.0-1.0)
    pub fraction: f64,

    /// Elapsed time as `M:SS`
    pub current_label: String,

    /// Total time as `M:SS`
    pub total_label: String,
}

/// Stateless progress calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSynchronizer;

impl ProgressSynchronizer {
    /// Compute a progress update from the transport's raw readings
    ///
    /// Returns `None` while the duration is not a positive finite number,
    /// which leaves whatever the view currently shows untouched.
    pub fn compute(current_time: f64, duration: f64) -> Option<ProgressUpdate> {
        if !duration.is_finite() || duration <= 0.0 {
            return None;
        }

        let fraction = if current_time.is_nan() {
            0.0
        } else {
            (current_time / duration).clamp(0.0, 1.0)
        };

        Some(ProgressUpdate {
            fraction,
            current_label: format_time(current_time),
            total_label: format_time(duration),
        })
    }

    /// The update shown right after a new track is selected
    pub fn reset() -> ProgressUpdate {
        ProgressUpdate {
            fraction: 0.0,
            current_label: format_time(0.0),
            total_label: format_time(0.0),
        }
    }
}

/// Format seconds as `M:SS`
///
/// Minutes are unbounded, seconds are zero-padded. Negative, NaN and infinite
/// inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
