//! Smooth animated scrolling

use folio_animation::Easing;
use folio_core::Millis;

/// Shortest smooth scroll
pub const MIN_SCROLL_MS: Millis = 300;
/// Longest smooth scroll
pub const MAX_SCROLL_MS: Millis = 900;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: Millis,
    duration_ms: Millis,
}

/// Eased scroll between two offsets over a distance-dependent duration
#[derive(Clone, Debug, Default)]
pub struct SmoothScroll {
    current: Option<ScrollAnimation>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration for a given distance: half a millisecond per pixel, clamped
    pub fn duration_for(distance: f32) -> Millis {
        ((distance.abs() * 0.5) as Millis).clamp(MIN_SCROLL_MS, MAX_SCROLL_MS)
    }

    /// Start a scroll. An in-flight scroll is superseded.
    pub fn start(&mut self, from: f32, to: f32, now: Millis) {
        let duration_ms = Self::duration_for(to - from);
        tracing::trace!(from, to, duration_ms, "smooth scroll started");
        self.current = Some(ScrollAnimation {
            from,
            to,
            started_at: now,
            duration_ms,
        });
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn target(&self) -> Option<f32> {
        self.current.map(|anim| anim.to)
    }

    /// Stop without reaching the target (the user took over scrolling)
    pub fn cancel(&mut self) {
        self.current = None;
    }

    /// Offset at `now`. Returns the final offset once and then `None`.
    pub fn tick(&mut self, now: Millis) -> Option<f32> {
        let anim = self.current?;
        let elapsed = now.saturating_sub(anim.started_at);
        if elapsed >= anim.duration_ms {
            self.current = None;
            return Some(anim.to);
        }
        let t = elapsed as f32 / anim.duration_ms as f32;
        Some(anim.from + (anim.to - anim.from) * Easing::EaseInOutCubic.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_is_clamped() {
        assert_eq!(SmoothScroll::duration_for(100.0), 300);
        assert_eq!(SmoothScroll::duration_for(-1200.0), 600);
        assert_eq!(SmoothScroll::duration_for(10_000.0), 900);
    }

    #[test]
    fn test_scroll_reaches_target_then_stops() {
        let mut scroll = SmoothScroll::new();
        scroll.start(0.0, 1200.0, 1000);

        let mid = scroll.tick(1300).unwrap();
        assert!(mid > 0.0 && mid < 1200.0);
        assert_eq!(scroll.tick(1600), Some(1200.0));
        assert!(!scroll.is_active());
        assert_eq!(scroll.tick(1700), None);
    }

    #[test]
    fn test_new_request_supersedes() {
        let mut scroll = SmoothScroll::new();
        scroll.start(0.0, 2000.0, 0);
        scroll.start(500.0, 0.0, 100);
        assert_eq!(scroll.target(), Some(0.0));
        assert_eq!(scroll.tick(10_000), Some(0.0));
    }
}
