//! Timeline orchestration for multiple tweens
//!
//! A `Timeline` is started once at an absolute logical time and sampled at
//! later times. A `Playhead` is the reversible variant used by
//! scroll-toggled animations that play forward on enter and rewind on leave.

use crate::keyframe::{KeyframeProperties, Tween};
use folio_core::Millis;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimelineEntryId;
}

/// An entry in a timeline
#[derive(Clone, Debug)]
struct TimelineEntry {
    /// Offset in milliseconds from timeline start
    offset_ms: u32,
    tween: Tween,
}

/// A timeline that orchestrates multiple tweens
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    started_at: Option<Millis>,
    duration_ms: Millis,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween to the timeline at a given offset
    pub fn add(&mut self, offset_ms: u32, tween: Tween) -> TimelineEntryId {
        let end_time = offset_ms as Millis + tween.end_ms();
        self.duration_ms = self.duration_ms.max(end_time);
        self.entries.insert(TimelineEntry { offset_ms, tween })
    }

    /// Start the timeline. Starting an already started timeline is a no-op.
    pub fn start(&mut self, now: Millis) {
        if self.started_at.is_none() {
            tracing::trace!(now, duration_ms = self.duration_ms, "timeline started");
            self.started_at = Some(now);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    /// Total length from start until the last entry settles
    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        match self.started_at {
            Some(start) => now.saturating_sub(start) >= self.duration_ms,
            None => false,
        }
    }

    /// Properties of an entry at `now`. An unstarted timeline holds every
    /// entry at its initial keyframe.
    pub fn sample(&self, id: TimelineEntryId, now: Millis) -> Option<KeyframeProperties> {
        let entry = self.entries.get(id)?;
        let Some(start) = self.started_at else {
            return Some(entry.tween.from);
        };
        let local = now
            .saturating_sub(start)
            .saturating_sub(entry.offset_ms as Millis);
        let before_offset = now < start + entry.offset_ms as Millis;
        if before_offset {
            return Some(entry.tween.from);
        }
        Some(entry.tween.sample(local))
    }
}

/// Direction a `Playhead` is moving
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayDirection {
    Forward,
    Reverse,
    Paused,
}

/// Reversible play position over a fixed length
///
/// Reversing mid-flight rewinds from the current position rather than
/// jumping to the end.
#[derive(Clone, Copy, Debug)]
pub struct Playhead {
    length_ms: Millis,
    anchor_at: Millis,
    anchor_pos: Millis,
    direction: PlayDirection,
}

impl Playhead {
    pub fn new(length_ms: Millis) -> Self {
        Self {
            length_ms,
            anchor_at: 0,
            anchor_pos: 0,
            direction: PlayDirection::Paused,
        }
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    /// Position in [0, length] at `now`
    pub fn position(&self, now: Millis) -> Millis {
        let dt = now.saturating_sub(self.anchor_at);
        match self.direction {
            PlayDirection::Forward => (self.anchor_pos + dt).min(self.length_ms),
            PlayDirection::Reverse => self.anchor_pos.saturating_sub(dt),
            PlayDirection::Paused => self.anchor_pos,
        }
    }

    fn redirect(&mut self, direction: PlayDirection, now: Millis) {
        self.anchor_pos = self.position(now);
        self.anchor_at = now;
        self.direction = direction;
    }

    pub fn play(&mut self, now: Millis) {
        self.redirect(PlayDirection::Forward, now);
    }

    pub fn reverse(&mut self, now: Millis) {
        self.redirect(PlayDirection::Reverse, now);
    }

    pub fn pause(&mut self, now: Millis) {
        self.redirect(PlayDirection::Paused, now);
    }

    /// Jump back to the start and stop
    pub fn reset(&mut self, now: Millis) {
        self.anchor_at = now;
        self.anchor_pos = 0;
        self.direction = PlayDirection::Paused;
    }

    /// Jump to the end and stop
    pub fn complete(&mut self, now: Millis) {
        self.anchor_at = now;
        self.anchor_pos = self.length_ms;
        self.direction = PlayDirection::Paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::AnimationPreset;

    #[test]
    fn test_unstarted_holds_initial() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, AnimationPreset::fade_in(600));
        assert_eq!(timeline.sample(id, 10_000).map(|p| p.opacity), Some(Some(0.0)));
        assert!(!timeline.is_finished(10_000));
    }

    #[test]
    fn test_offsets_delay_entries() {
        let mut timeline = Timeline::new();
        let first = timeline.add(0, AnimationPreset::fade_in(600));
        let second = timeline.add(100, AnimationPreset::fade_in(600));
        assert_eq!(timeline.duration_ms(), 700);

        timeline.start(1_000);
        assert_eq!(timeline.sample(first, 1_600).and_then(|p| p.opacity), Some(1.0));
        assert_eq!(timeline.sample(second, 1_100).and_then(|p| p.opacity), Some(0.0));
        assert!(!timeline.is_finished(1_699));
        assert!(timeline.is_finished(1_700));
    }

    #[test]
    fn test_restart_keeps_first_start() {
        let mut timeline = Timeline::new();
        timeline.start(10);
        timeline.start(500);
        assert_eq!(timeline.started_at(), Some(10));
    }

    #[test]
    fn test_playhead_reverses_from_current_position() {
        let mut head = Playhead::new(1_000);
        head.play(0);
        assert_eq!(head.position(400), 400);

        head.reverse(400);
        assert_eq!(head.position(500), 300);
        assert_eq!(head.position(2_000), 0);

        head.play(2_000);
        assert_eq!(head.position(5_000), 1_000);
    }

    #[test]
    fn test_playhead_reset_and_complete() {
        let mut head = Playhead::new(800);
        head.complete(0);
        assert_eq!(head.position(100), 800);
        head.reset(100);
        assert_eq!(head.position(900), 0);
        assert_eq!(head.direction(), PlayDirection::Paused);
    }
}
