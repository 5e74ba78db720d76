//! Event vocabulary
//!
//! The page is driven by a handful of event kinds: scroll samples, the end
//! of a scroll gesture, viewport resizes, mount and clicks on named controls.
//! Timer expirations are delivered separately through `TimerQueue`. Each
//! event is processed to completion before the next.

use crate::timer::Millis;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Click on a named control (`Event::target` holds the control name)
    pub const CLICK: EventType = 3;
    pub const SCROLL: EventType = 30;
    /// Scroll gesture ended (momentum finished)
    pub const SCROLL_END: EventType = 31;
    pub const RESIZE: EventType = 40;
    pub const MOUNT: EventType = 60;
}

/// A page event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Name of the control or region the event is addressed to ("" for window-level events)
    pub target: String,
    pub data: EventData,
    pub timestamp_ms: Millis,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Absolute vertical scroll offset of the document
    Scroll { offset_y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    /// Window scroll sample at absolute offset `offset_y`
    pub fn scroll(offset_y: f32, timestamp_ms: Millis) -> Self {
        Self {
            event_type: event_types::SCROLL,
            target: String::new(),
            data: EventData::Scroll { offset_y },
            timestamp_ms,
        }
    }

    /// Scroll gesture momentum has ended
    pub fn scroll_end(timestamp_ms: Millis) -> Self {
        Self {
            event_type: event_types::SCROLL_END,
            target: String::new(),
            data: EventData::None,
            timestamp_ms,
        }
    }

    pub fn resize(width: f32, height: f32, timestamp_ms: Millis) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: String::new(),
            data: EventData::Resize { width, height },
            timestamp_ms,
        }
    }

    /// Click on the control named `target`
    pub fn click(target: impl Into<String>, timestamp_ms: Millis) -> Self {
        Self {
            event_type: event_types::CLICK,
            target: target.into(),
            data: EventData::None,
            timestamp_ms,
        }
    }

    pub fn mount(timestamp_ms: Millis) -> Self {
        Self {
            event_type: event_types::MOUNT,
            target: String::new(),
            data: EventData::None,
            timestamp_ms,
        }
    }

    /// Scroll offset carried by a scroll event
    pub fn scroll_offset(&self) -> Option<f32> {
        match self.data {
            EventData::Scroll { offset_y } => Some(offset_y),
            _ => None,
        }
    }
}
