//! Folio Animation System
//!
//! Time-based tweens for entrance animations and scroll-linked triggers for
//! scrubbed effects.
//!
//! # Features
//!
//! - **Easing**: CSS keyword curves and polynomial eases
//! - **Tweens**: two-keyframe animations with delay, sampled at a logical time
//! - **Timelines**: orchestrate multiple tweens with offsets
//! - **Scroll Triggers**: marker-based scroll ranges, scrub, snap and toggle actions

pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod scroll_trigger;
pub mod timeline;

pub use easing::Easing;
pub use keyframe::{KeyframeProperties, Tween};
pub use presets::{AnimationPreset, RevealTiming};
pub use scroll_trigger::{
    scrub, Edge, Marker, ScrollRange, ScrollTrigger, Snap, ToggleAction, ToggleActions,
    ToggleTracker, TriggerEnd, TriggerParseError,
};
pub use timeline::{PlayDirection, Playhead, Timeline, TimelineEntryId};
