//! Copy-to-clipboard control
//!
//! One control copies the contact address. After a successful copy the
//! control shows a confirmation for two seconds, then reverts. Copying again
//! while the confirmation is up restarts the two seconds.

use crate::app::AppTimer;
use clipboard_rs::{Clipboard as _, ClipboardContext};
use folio_core::{Millis, StateMachine, TimerQueue};
use std::fmt;
use thiserror::Error;

/// How long the confirmation label stays up
pub const COPY_CONFIRMATION_MS: Millis = 2_000;

pub const COPIED_LABEL: &str = "Copied to clipboard!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write clipboard: {0}")]
    Write(String),
}

/// Destination for copied text
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard
pub struct SystemClipboard {
    context: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let context =
            ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { context })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.context
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// In-process clipboard for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failing: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write
    pub fn failing() -> Self {
        Self {
            contents: None,
            failing: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.failing {
            return Err(ClipboardError::Write("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum CopyState {
    Idle,
    Copied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum CopyEvent {
    Copy,
    Elapsed,
}

/// Control that copies a fixed address
pub struct CopyControl {
    text: String,
    state: StateMachine<CopyState, CopyEvent>,
}

impl CopyControl {
    pub fn new(text: impl Into<String>) -> Self {
        let state = StateMachine::builder(CopyState::Idle)
            .on(CopyState::Idle, CopyEvent::Copy, CopyState::Copied)
            .on(CopyState::Copied, CopyEvent::Copy, CopyState::Copied)
            .on(CopyState::Copied, CopyEvent::Elapsed, CopyState::Idle)
            .build();
        Self {
            text: text.into(),
            state,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Copy the address. A failed write leaves the label unchanged.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn Clipboard,
        now: Millis,
        timers: &mut TimerQueue<AppTimer>,
    ) -> Result<(), ClipboardError> {
        if let Err(e) = clipboard.set_text(&self.text) {
            tracing::warn!("CopyControl::copy - {}", e);
            return Err(e);
        }
        self.state.send(CopyEvent::Copy);
        timers.schedule(AppTimer::CopyConfirmation, now + COPY_CONFIRMATION_MS);
        Ok(())
    }

    /// The confirmation timer fired
    pub fn on_confirmation_elapsed(&mut self) {
        self.state.send(CopyEvent::Elapsed);
    }

    pub fn is_confirming(&self) -> bool {
        self.state.is_in(CopyState::Copied)
    }

    /// Text the control shows
    pub fn label(&self) -> &str {
        if self.is_confirming() {
            COPIED_LABEL
        } else {
            &self.text
        }
    }
}

impl fmt::Debug for CopyControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyControl")
            .field("text", &self.text)
            .field("confirming", &self.is_confirming())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "mohithsiddhartht@gmail.com";

    #[test]
    fn test_copy_shows_confirmation() {
        let mut control = CopyControl::new(EMAIL);
        let mut clipboard = MemoryClipboard::new();
        let mut timers = TimerQueue::new();

        assert_eq!(control.label(), EMAIL);
        control.copy(&mut clipboard, 100, &mut timers).unwrap();
        assert_eq!(clipboard.contents(), Some(EMAIL));
        assert_eq!(control.label(), COPIED_LABEL);
        assert_eq!(timers.deadline(&AppTimer::CopyConfirmation), Some(2_100));

        control.on_confirmation_elapsed();
        assert_eq!(control.label(), EMAIL);
    }

    #[test]
    fn test_copy_again_restarts_window() {
        let mut control = CopyControl::new(EMAIL);
        let mut clipboard = MemoryClipboard::new();
        let mut timers = TimerQueue::new();

        control.copy(&mut clipboard, 0, &mut timers).unwrap();
        control.copy(&mut clipboard, 1_500, &mut timers).unwrap();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.deadline(&AppTimer::CopyConfirmation), Some(3_500));
    }

    #[test]
    fn test_failed_copy_shows_nothing() {
        let mut control = CopyControl::new(EMAIL);
        let mut clipboard = MemoryClipboard::failing();
        let mut timers = TimerQueue::new();

        assert!(control.copy(&mut clipboard, 0, &mut timers).is_err());
        assert!(!control.is_confirming());
        assert!(timers.is_empty());
    }
}
