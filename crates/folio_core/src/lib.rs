//! Folio Core Runtime
//!
//! Foundational primitives shared by every folio crate:
//!
//! - **Geometry**: points, sizes and rects in logical pixels
//! - **Events**: the scroll/resize/click vocabulary the page reacts to
//! - **State Machines**: typed flat statecharts for small interaction states
//! - **Timers**: one-shot deadlines over a logical millisecond clock
//!
//! Everything here is single-threaded and cooperative. Callers feed events
//! and the current logical time in; nothing runs in the background.
//!
//! # Example
//!
//! ```rust
//! use folio_core::timer::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule("banner", 5_000);
//!
//! assert!(timers.drain_due(4_999).is_empty());
//! assert_eq!(timers.drain_due(5_000), vec!["banner"]);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod timer;

pub use events::{Event, EventData, EventType};
pub use fsm::{StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
pub use timer::{Millis, TimerQueue};
