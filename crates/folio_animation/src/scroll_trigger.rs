//! Scroll-linked animation triggers
//!
//! A trigger maps a region of the document to a range of scroll offsets.
//! Markers use the familiar `"<element edge> <viewport edge>"` notation: the
//! range starts when the element's edge reaches the given point of the
//! viewport. Progress through the range drives scrubbed properties directly,
//! without easing, so the animation tracks the scroll position one to one.

use folio_core::{Millis, Rect};
use smallvec::SmallVec;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TriggerParseError {
    #[error("invalid edge `{0}` (expected top, center, bottom, N% or Npx)")]
    InvalidEdge(String),
    #[error("invalid marker `{0}`")]
    InvalidMarker(String),
    #[error("invalid toggle action `{0}`")]
    InvalidAction(String),
    #[error("toggle actions need four entries, got {0}")]
    ToggleArity(usize),
}

/// A position along one axis of the element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Fraction of the extent (top = 0, center = 0.5, bottom = 1)
    Fraction(f32),
    /// Absolute pixels from the start of the extent
    Pixels(f32),
}

impl Edge {
    pub const TOP: Edge = Edge::Fraction(0.0);
    pub const CENTER: Edge = Edge::Fraction(0.5);
    pub const BOTTOM: Edge = Edge::Fraction(1.0);

    /// Offset of this edge within an extent of `length` pixels
    pub fn offset(&self, length: f32) -> f32 {
        match *self {
            Edge::Fraction(f) => f * length,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "top" | "left" => return Ok(Edge::TOP),
            "center" => return Ok(Edge::CENTER),
            "bottom" | "right" => return Ok(Edge::BOTTOM),
            _ => {}
        }
        let invalid = || TriggerParseError::InvalidEdge(s.to_string());
        if let Some(pct) = s.strip_suffix('%') {
            let value: f32 = pct.parse().map_err(|_| invalid())?;
            return Ok(Edge::Fraction(value / 100.0));
        }
        if let Some(px) = s.strip_suffix("px") {
            let value: f32 = px.parse().map_err(|_| invalid())?;
            return Ok(Edge::Pixels(value));
        }
        s.parse::<f32>().map(Edge::Pixels).map_err(|_| invalid())
    }
}

/// Element edge meeting a viewport edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub element: Edge,
    pub viewport: Edge,
}

impl Marker {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which `element` (document space) reaches the marker
    pub fn resolve(&self, element: &Rect, viewport_height: f32) -> f32 {
        element.top() + self.element.offset(element.height())
            - self.viewport.offset(viewport_height)
    }
}

impl FromStr for Marker {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let element = parts
            .next()
            .ok_or_else(|| TriggerParseError::InvalidMarker(s.to_string()))?
            .parse()?;
        let viewport = match parts.next() {
            Some(edge) => edge.parse()?,
            None => Edge::TOP,
        };
        if parts.next().is_some() {
            return Err(TriggerParseError::InvalidMarker(s.to_string()));
        }
        Ok(Marker { element, viewport })
    }
}

/// End of a trigger range
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEnd {
    Marker(Marker),
    /// Fixed distance past the start (`"+=N"`)
    Relative(f32),
}

impl FromStr for TriggerEnd {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(rest) = trimmed.strip_prefix("+=") {
            let px = rest.trim().trim_end_matches("px");
            return px
                .parse()
                .map(TriggerEnd::Relative)
                .map_err(|_| TriggerParseError::InvalidMarker(s.to_string()));
        }
        trimmed.parse().map(TriggerEnd::Marker)
    }
}

/// A start/end pair of markers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub start: Marker,
    pub end: TriggerEnd,
}

impl Default for ScrollTrigger {
    /// Active while any part of the element is on screen
    fn default() -> Self {
        Self {
            start: Marker::new(Edge::TOP, Edge::BOTTOM),
            end: TriggerEnd::Marker(Marker::new(Edge::BOTTOM, Edge::TOP)),
        }
    }
}

impl ScrollTrigger {
    pub fn new(start: Marker, end: TriggerEnd) -> Self {
        Self { start, end }
    }

    /// Parse a trigger from start/end marker strings
    pub fn parse(start: &str, end: &str) -> Result<Self, TriggerParseError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Pinned triggers start when the element's top reaches the viewport top
    pub fn pinned(distance: f32) -> Self {
        Self {
            start: Marker::new(Edge::TOP, Edge::TOP),
            end: TriggerEnd::Relative(distance),
        }
    }

    /// Resolve against an element rect in document space
    pub fn range(&self, element: &Rect, viewport_height: f32) -> ScrollRange {
        let start = self.start.resolve(element, viewport_height);
        let end = match self.end {
            TriggerEnd::Marker(marker) => marker.resolve(element, viewport_height),
            TriggerEnd::Relative(px) => start + px,
        };
        ScrollRange { start, end }
    }
}

/// Resolved scroll offsets of a trigger
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    pub fn length(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }

    /// Progress through the range, clamped to [0, 1].
    ///
    /// A zero-length (or inverted) range acts as a step at `start`.
    pub fn progress(&self, scroll_y: f32) -> f32 {
        let length = self.end - self.start;
        if length <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / length).clamp(0.0, 1.0)
    }

    /// Scroll offset corresponding to a progress value
    pub fn scroll_for(&self, progress: f32) -> f32 {
        self.start + self.length() * progress.clamp(0.0, 1.0)
    }

    /// Where `scroll_y` sits relative to the range
    pub fn phase(&self, scroll_y: f32) -> RangePhase {
        if scroll_y < self.start {
            RangePhase::Before
        } else if scroll_y > self.end {
            RangePhase::After
        } else {
            RangePhase::Active
        }
    }
}

/// Linear interpolation driven by scroll progress
pub fn scrub(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress.clamp(0.0, 1.0)
}

/// Snapping applied when a scroll gesture settles inside a range
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Snap {
    #[default]
    None,
    /// Snap progress to the nearest multiple of the step
    Increments(f32),
}

impl Snap {
    /// One snap point per card boundary
    pub fn for_cards(count: usize) -> Self {
        if count <= 1 {
            Snap::None
        } else {
            Snap::Increments(1.0 / (count - 1) as f32)
        }
    }

    pub fn apply(&self, progress: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        match *self {
            Snap::None => progress,
            Snap::Increments(step) if step > 0.0 => {
                ((progress / step).round() * step).clamp(0.0, 1.0)
            }
            Snap::Increments(_) => progress,
        }
    }
}

/// Position of the scroll offset relative to a trigger range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangePhase {
    Before,
    Active,
    After,
}

/// What a toggled animation does on a range boundary crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl FromStr for ToggleAction {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            other => return Err(TriggerParseError::InvalidAction(other.to_string())),
        })
    }
}

/// Actions for entering, leaving, entering back and leaving back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// `"play none none none"`
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = TriggerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<SmallVec<[ToggleAction; 4]>, _>>()?;
        match actions.as_slice() {
            &[on_enter, on_leave, on_enter_back, on_leave_back] => Ok(Self {
                on_enter,
                on_leave,
                on_enter_back,
                on_leave_back,
            }),
            other => Err(TriggerParseError::ToggleArity(other.len())),
        }
    }
}

/// Tracks boundary crossings of a range and reports the configured actions
#[derive(Clone, Copy, Debug)]
pub struct ToggleTracker {
    actions: ToggleActions,
    phase: RangePhase,
}

impl ToggleTracker {
    pub fn new(actions: ToggleActions) -> Self {
        Self {
            actions,
            phase: RangePhase::Before,
        }
    }

    pub fn phase(&self) -> RangePhase {
        self.phase
    }

    /// Update with a new scroll sample. A jump across the whole range reports
    /// both crossings in order.
    pub fn update(&mut self, range: &ScrollRange, scroll_y: f32) -> SmallVec<[ToggleAction; 2]> {
        let next = range.phase(scroll_y);
        let a = &self.actions;
        let fired: SmallVec<[ToggleAction; 2]> = match (self.phase, next) {
            (RangePhase::Before, RangePhase::Active) => smallvec::smallvec![a.on_enter],
            (RangePhase::Before, RangePhase::After) => {
                smallvec::smallvec![a.on_enter, a.on_leave]
            }
            (RangePhase::Active, RangePhase::After) => smallvec::smallvec![a.on_leave],
            (RangePhase::After, RangePhase::Active) => smallvec::smallvec![a.on_enter_back],
            (RangePhase::After, RangePhase::Before) => {
                smallvec::smallvec![a.on_enter_back, a.on_leave_back]
            }
            (RangePhase::Active, RangePhase::Before) => smallvec::smallvec![a.on_leave_back],
            _ => SmallVec::new(),
        };
        self.phase = next;
        fired
            .into_iter()
            .filter(|action| *action != ToggleAction::None)
            .collect()
    }
}

/// Apply a toggle action to a playhead
pub fn apply_toggle(head: &mut crate::timeline::Playhead, action: ToggleAction, now: Millis) {
    match action {
        ToggleAction::Play | ToggleAction::Resume => head.play(now),
        ToggleAction::Pause => head.pause(now),
        ToggleAction::Reverse => head.reverse(now),
        ToggleAction::Restart => {
            head.reset(now);
            head.play(now);
        }
        ToggleAction::Reset => head.reset(now),
        ToggleAction::Complete => head.complete(now),
        ToggleAction::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markers() {
        let marker: Marker = "top center".parse().unwrap();
        assert_eq!(marker, Marker::new(Edge::TOP, Edge::CENTER));

        let marker: Marker = "top 80%".parse().unwrap();
        assert_eq!(marker.viewport, Edge::Fraction(0.8));

        let marker: Marker = "bottom 120px".parse().unwrap();
        assert_eq!(marker.viewport, Edge::Pixels(120.0));

        assert!("middle top".parse::<Marker>().is_err());
        assert!("top top top".parse::<Marker>().is_err());
    }

    #[test]
    fn test_parse_relative_end() {
        let end: TriggerEnd = "+=2400".parse().unwrap();
        assert_eq!(end, TriggerEnd::Relative(2400.0));
    }

    #[test]
    fn test_top_center_to_bottom_center() {
        let trigger = ScrollTrigger::parse("top center", "bottom center").unwrap();
        let section = Rect::new(0.0, 1000.0, 1280.0, 800.0);
        let range = trigger.range(&section, 720.0);
        assert_eq!(range, ScrollRange { start: 640.0, end: 1440.0 });
        assert_eq!(range.progress(1040.0), 0.5);
    }

    #[test]
    fn test_progress_is_clamped() {
        let range = ScrollRange { start: 100.0, end: 300.0 };
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(200.0), 0.5);
        assert_eq!(range.progress(1_000.0), 1.0);
    }

    #[test]
    fn test_zero_length_range_is_a_step() {
        let range = ScrollRange { start: 50.0, end: 50.0 };
        assert_eq!(range.progress(49.9), 0.0);
        assert_eq!(range.progress(50.0), 1.0);
    }

    #[test]
    fn test_scrub_is_linear() {
        assert_eq!(scrub(0.8, 1.0, 0.0), 0.8);
        assert_eq!(scrub(0.0, 100.0, 0.25), 25.0);
        assert_eq!(scrub(0.0, 100.0, 2.0), 100.0);
    }

    #[test]
    fn test_snap_for_cards() {
        assert_eq!(Snap::for_cards(1), Snap::None);
        assert_eq!(Snap::for_cards(5), Snap::Increments(0.25));

        let snap = Snap::for_cards(5);
        assert_eq!(snap.apply(0.3), 0.25);
        assert_eq!(snap.apply(0.4), 0.5);
        assert_eq!(snap.apply(0.99), 1.0);
    }

    #[test]
    fn test_toggle_actions_parse() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions.on_enter, ToggleAction::Play);
        assert_eq!(actions.on_leave_back, ToggleAction::Reverse);
        assert_eq!(
            "play none".parse::<ToggleActions>(),
            Err(TriggerParseError::ToggleArity(2))
        );
    }

    #[test]
    fn test_toggle_tracker_crossings() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        let mut tracker = ToggleTracker::new(actions);
        let range = ScrollRange { start: 100.0, end: 500.0 };

        assert!(tracker.update(&range, 50.0).is_empty());
        assert_eq!(tracker.update(&range, 150.0).as_slice(), &[ToggleAction::Play]);
        assert!(tracker.update(&range, 300.0).is_empty());
        // leave is "none"
        assert!(tracker.update(&range, 600.0).is_empty());
        // enter back is "none", leave back is "reverse"
        assert_eq!(tracker.update(&range, 10.0).as_slice(), &[ToggleAction::Reverse]);
    }
}
