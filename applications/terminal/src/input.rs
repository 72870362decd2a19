//! Line-based input
//!
//! Each line typed at the prompt becomes one [`Input`]. Keyboard shortcuts go
//! through the controller's key bindings; everything else maps straight to a
//! command or an OS media action.

use crate::error::{Result, TerminalError};
use marigold_playback::{Key, MediaAction, PlayerCommand};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Command(PlayerCommand),
    Key(Key),
    /// Simulated OS media-key press
    Media(MediaAction),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  space | p           play/pause
  n | next            next track
  b | prev            previous track
  <1-N>               play track N
  seek <0-100>        seek to percent
  vol <0-100>         set volume
  m | mute            mute/unmute
  up | down           volume +/-
  left | right        seek -/+
  media <play|pause|next|prev|back [secs]|fwd [secs]>
  help | ?            this help
  q | quit            exit";

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Input> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((head, args)) = words.split_first() else {
        return Err(TerminalError::Input("empty line".to_string()));
    };
    let head = head.to_ascii_lowercase();

    if head == "media" {
        return match args {
            [action] => parse_media(action, None),
            [action, offset] => parse_media(action, Some(*offset)),
            _ => Err(TerminalError::Input(
                "usage: media <play|pause|next|prev|back [secs]|fwd [secs]>".to_string(),
            )),
        };
    }

    let arg = match args {
        [] => None,
        [arg] => Some(*arg),
        [_, extra, ..] => {
            return Err(TerminalError::Input(format!("unexpected argument '{extra}'")));
        }
    };

    let input = match (head.as_str(), arg) {
        ("space" | "p", None) => Input::Key(Key::Space),
        ("n" | "next", None) => Input::Command(PlayerCommand::Next),
        ("b" | "prev", None) => Input::Command(PlayerCommand::Previous),
        ("m" | "mute", None) => Input::Command(PlayerCommand::ToggleMute),
        ("up", None) => Input::Key(Key::ArrowUp),
        ("down", None) => Input::Key(Key::ArrowDown),
        ("left", None) => Input::Key(Key::ArrowLeft),
        ("right", None) => Input::Key(Key::ArrowRight),
        ("seek", Some(value)) => Input::Command(PlayerCommand::SeekToPercent(percent(value)?)),
        ("vol", Some(value)) => Input::Command(PlayerCommand::SetVolume(percent(value)?)),
        ("help" | "?", None) => Input::Help,
        ("q" | "quit", None) => Input::Quit,
        (number, None) if number.chars().all(|c| c.is_ascii_digit()) => {
            let position: usize = number
                .parse()
                .map_err(|_| TerminalError::Input(format!("bad track number '{number}'")))?;
            if position == 0 {
                return Err(TerminalError::Input("tracks are numbered from 1".to_string()));
            }
            Input::Command(PlayerCommand::SelectTrack(position - 1))
        }
        _ => return Err(TerminalError::Input(format!("unknown command '{}'", line.trim()))),
    };
    Ok(input)
}

/// `media` lines carry an optional third word, so they are parsed separately
fn parse_media(action: &str, offset: Option<&str>) -> Result<Input> {
    let offset = offset.map(seconds).transpose()?;
    let action = match (action.to_ascii_lowercase().as_str(), offset) {
        ("play", None) => MediaAction::Play,
        ("pause", None) => MediaAction::Pause,
        ("next", None) => MediaAction::NextTrack,
        ("prev", None) => MediaAction::PreviousTrack,
        ("back", offset) => MediaAction::SeekBackward { offset },
        ("fwd", offset) => MediaAction::SeekForward { offset },
        (name @ ("play" | "pause" | "next" | "prev"), Some(_)) => {
            return Err(TerminalError::Input(format!("media {name} takes no offset")));
        }
        (other, _) => {
            return Err(TerminalError::Input(format!("unknown media action '{other}'")));
        }
    };
    Ok(Input::Media(action))
}

fn percent(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim_end_matches('%')
        .parse()
        .map_err(|_| TerminalError::Input(format!("'{value}' is not a number")))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(TerminalError::Input(format!("'{value}' is not a number")))
    }
}

fn seconds(value: &str) -> Result<f64> {
    let parsed = percent(value.trim_end_matches('s'))?;
    if parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(TerminalError::Input(format!("offset must be positive, got '{value}'")))
    }
}
