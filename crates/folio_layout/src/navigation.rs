//! Scrollspy and navigation
//!
//! The active section is re-evaluated on every scroll sample: the first
//! section, in declared order, whose viewport rect straddles the probe line
//! wins. If none straddles it the previous value is kept, so there is no
//! "no section" state.

use crate::page::PageLayout;
use crate::scroll::SmoothScroll;
use crate::section::SectionId;
use crate::viewport::Viewport;
use folio_core::Millis;

/// Distance of the probe line from the viewport top
pub const PROBE_LINE: f32 = 100.0;

/// Scroll offset past which the navigation bar switches to its scrolled style
pub const SCROLLED_THRESHOLD: f32 = 50.0;

/// One entry of the navigation menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub id: SectionId,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    active: SectionId,
    scrolled: bool,
    scroll: SmoothScroll,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            active: SectionId::Home,
            scrolled: false,
            scroll: SmoothScroll::new(),
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Process a scroll sample. Returns the active section afterwards.
    pub fn on_scroll(&mut self, layout: &PageLayout, scroll_y: f32) -> SectionId {
        self.scrolled = scroll_y > SCROLLED_THRESHOLD;

        let hit = SectionId::ALL.into_iter().find(|&id| {
            layout
                .bounding_rect(id, scroll_y)
                .is_some_and(|rect| rect.straddles_y(PROBE_LINE))
        });
        if let Some(id) = hit {
            if id != self.active {
                tracing::trace!(from = %self.active, to = %id, "active section changed");
            }
            self.active = id;
        }
        self.active
    }

    /// Request a smooth scroll to a section.
    ///
    /// Returns false, without side effects, when the section is not mounted.
    /// Otherwise the section becomes active immediately; the next scroll
    /// sample confirms or corrects it.
    pub fn scroll_to(
        &mut self,
        id: SectionId,
        layout: &PageLayout,
        current_y: f32,
        viewport: Viewport,
        now: Millis,
    ) -> bool {
        let Some(top) = layout.section_top(id) else {
            tracing::debug!("NavigationController::scroll_to - section `{}` not mounted", id);
            return false;
        };
        let target = top.min(layout.max_scroll(viewport)).max(0.0);
        self.scroll.start(current_y, target, now);
        self.active = id;
        true
    }

    /// Start a smooth scroll to an absolute offset, without touching the
    /// active section
    pub fn scroll_to_offset(&mut self, from: f32, to: f32, now: Millis) {
        self.scroll.start(from, to, now);
    }

    /// Drop any in-flight smooth scroll
    pub fn cancel_scroll(&mut self) {
        self.scroll.cancel();
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_active()
    }

    /// Advance the smooth scroll. Returns the offset to apply, if any.
    pub fn tick(&mut self, now: Millis) -> Option<f32> {
        self.scroll.tick(now)
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        SectionId::ALL
            .into_iter()
            .map(|id| NavItem {
                id,
                label: id.label(),
                active: id == self.active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Target;
    use folio_core::Rect;

    fn stacked(heights: &[(SectionId, f32)]) -> PageLayout {
        let mut top = 0.0;
        PageLayout::from_boxes(heights.iter().map(|&(id, h)| {
            let rect = Rect::new(0.0, top, 1280.0, h);
            top += h;
            (Target::Section(id), rect)
        }))
    }

    #[test]
    fn test_initial_state() {
        let nav = NavigationController::new();
        assert_eq!(nav.active(), SectionId::Home);
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn test_scrolled_threshold_is_strict() {
        let layout = stacked(&[(SectionId::Home, 720.0)]);
        let mut nav = NavigationController::new();
        nav.on_scroll(&layout, 50.0);
        assert!(!nav.is_scrolled());
        nav.on_scroll(&layout, 50.5);
        assert!(nav.is_scrolled());
        nav.on_scroll(&layout, 0.0);
        assert!(!nav.is_scrolled());
    }

    #[test]
    fn test_first_straddling_section_wins() {
        // About ends exactly on the probe line where Skills begins
        let layout = stacked(&[
            (SectionId::Home, 720.0),
            (SectionId::About, 500.0),
            (SectionId::Skills, 800.0),
        ]);
        let mut nav = NavigationController::new();
        assert_eq!(nav.on_scroll(&layout, 1120.0), SectionId::About);
        assert_eq!(nav.on_scroll(&layout, 1121.0), SectionId::Skills);
    }

    #[test]
    fn test_gap_keeps_previous_section() {
        let layout = PageLayout::from_boxes([
            (Target::Section(SectionId::Home), Rect::new(0.0, 0.0, 1280.0, 720.0)),
            (Target::Section(SectionId::Contact), Rect::new(0.0, 2000.0, 1280.0, 720.0)),
        ]);
        let mut nav = NavigationController::new();
        assert_eq!(nav.on_scroll(&layout, 1000.0), SectionId::Home);
        assert_eq!(nav.on_scroll(&layout, 1950.0), SectionId::Contact);
        assert_eq!(nav.on_scroll(&layout, 1500.0), SectionId::Contact);
    }

    #[test]
    fn test_scroll_to_sets_active_optimistically() {
        let layout = stacked(&[
            (SectionId::Home, 720.0),
            (SectionId::About, 900.0),
            (SectionId::Skills, 900.0),
        ]);
        let viewport = Viewport::new(1280.0, 720.0);
        let mut nav = NavigationController::new();

        assert!(nav.scroll_to(SectionId::About, &layout, 0.0, viewport, 0));
        assert_eq!(nav.active(), SectionId::About);

        let mut last = 0.0;
        let mut now = 0;
        while let Some(y) = nav.tick(now) {
            last = y;
            now += 16;
        }
        assert_eq!(last, 720.0);
    }

    #[test]
    fn test_scroll_to_is_clamped_to_max_scroll() {
        let layout = stacked(&[(SectionId::Home, 720.0), (SectionId::Contact, 300.0)]);
        let viewport = Viewport::new(1280.0, 720.0);
        let mut nav = NavigationController::new();

        assert!(nav.scroll_to(SectionId::Contact, &layout, 0.0, viewport, 0));
        assert_eq!(nav.tick(10_000), Some(300.0));
    }

    #[test]
    fn test_scroll_to_missing_section_is_a_no_op() {
        let layout = stacked(&[(SectionId::Home, 720.0)]);
        let mut nav = NavigationController::new();
        assert!(!nav.scroll_to(SectionId::Education, &layout, 0.0, Viewport::default(), 0));
        assert_eq!(nav.active(), SectionId::Home);
        assert!(!nav.is_scrolling());
    }

    #[test]
    fn test_nav_items_mark_active() {
        let nav = NavigationController::new();
        let items = nav.nav_items();
        assert_eq!(items.len(), 7);
        assert!(items[0].active);
        assert_eq!(items.iter().filter(|item| item.active).count(), 1);
        assert_eq!(items[3].label, "Projects");
    }
}
