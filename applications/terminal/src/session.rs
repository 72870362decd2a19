//! Media session that reports to the log
//!
//! A terminal has no lock screen, so "now playing" updates are logged and
//! the registered actions are remembered. `media ...` input lines are then
//! delivered only for actions the controller registered, as an OS would.

use marigold_playback::{
    MediaActionKind, MediaMetadata, MediaSession, SessionError, SessionPlaybackState,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared view of the actions registered with a [`LoggingSession`]
#[derive(Debug, Clone, Default)]
pub struct RegisteredActions(Rc<RefCell<Vec<MediaActionKind>>>);

impl RegisteredActions {
    pub fn contains(&self, kind: MediaActionKind) -> bool {
        self.0.borrow().contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct LoggingSession {
    registered: RegisteredActions,
}

impl LoggingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for checking registrations after the session is handed over
    pub fn registered(&self) -> RegisteredActions {
        self.registered.clone()
    }
}

impl MediaSession for LoggingSession {
    fn register_action(&mut self, action: MediaActionKind) -> Result<(), SessionError> {
        tracing::debug!(?action, "Media action registered");
        self.registered.0.borrow_mut().push(action);
        Ok(())
    }

    fn set_metadata(&mut self, metadata: MediaMetadata) -> Result<(), SessionError> {
        tracing::info!(
            title = %metadata.title,
            artist = %metadata.artist,
            artwork = ?metadata.artwork.first().map(|a| a.src.as_str()),
            "Now playing"
        );
        Ok(())
    }

    fn set_playback_state(&mut self, state: SessionPlaybackState) -> Result<(), SessionError> {
        tracing::debug!(?state, "Media session playback state");
        Ok(())
    }
}
