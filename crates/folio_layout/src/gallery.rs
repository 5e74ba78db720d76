//! Pinned horizontal project gallery
//!
//! The card row is pinned at the top of the viewport while the page scrolls
//! through twice its width. Over that distance every card is translated by
//! `-100% x (n - 1)` of its own width, scrubbed linearly, and a settling
//! gesture snaps to the nearest card boundary.

use crate::page::{PageLayout, PAGE_PADDING_X};
use crate::section::Target;
use crate::viewport::Viewport;
use folio_animation::{scrub, ScrollRange, ScrollTrigger, Snap};

/// Card width at and above the `md` breakpoint
pub const CARD_WIDTH_MD: f32 = 600.0;
/// Card width below the breakpoint, as a fraction of the viewport width
pub const CARD_WIDTH_NARROW: f32 = 0.9;
/// Horizontal gap between cards
pub const CARD_GAP: f32 = 32.0;
/// Pinned scroll distance as a multiple of the row's width
pub const PIN_DISTANCE_FACTOR: f32 = 2.0;

/// Width of one project card
pub fn card_width(viewport: Viewport) -> f32 {
    if viewport.is_md() {
        CARD_WIDTH_MD
    } else {
        viewport.width * CARD_WIDTH_NARROW
    }
}

/// Width of the pinned row container (the page width minus gutters)
pub fn track_width(viewport: Viewport) -> f32 {
    (viewport.width - 2.0 * PAGE_PADDING_X).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinnedGallery {
    card_count: usize,
    snap: Snap,
}

impl PinnedGallery {
    pub fn new(card_count: usize) -> Self {
        Self {
            card_count,
            snap: Snap::for_cards(card_count),
        }
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn snap(&self) -> Snap {
        self.snap
    }

    /// Trigger for a row of the given width
    pub fn trigger(&self, track_width: f32) -> ScrollTrigger {
        ScrollTrigger::pinned(PIN_DISTANCE_FACTOR * track_width)
    }

    /// Pinned scroll range, if the row is mounted
    pub fn range(&self, layout: &PageLayout, viewport: Viewport) -> Option<ScrollRange> {
        let track = layout.document_rect(Target::ProjectsTrack)?;
        Some(self.trigger(track.width()).range(&track, viewport.height))
    }

    /// Scrub progress at a scroll offset; zero when the row is not mounted
    pub fn progress(&self, layout: &PageLayout, viewport: Viewport, scroll_y: f32) -> f32 {
        self.range(layout, viewport)
            .map_or(0.0, |range| range.progress(scroll_y))
    }

    /// Horizontal offset of every card, in percent of card width
    pub fn translate_percent(&self, progress: f32) -> f32 {
        let span = self.card_count.saturating_sub(1) as f32;
        scrub(0.0, -100.0 * span, progress)
    }

    /// Horizontal offset of every card in pixels
    pub fn translate_px(&self, progress: f32, viewport: Viewport) -> f32 {
        self.translate_percent(progress) / 100.0 * card_width(viewport)
    }

    pub fn is_pinned(&self, layout: &PageLayout, viewport: Viewport, scroll_y: f32) -> bool {
        self.range(layout, viewport).is_some_and(|range| {
            range.length() > 0.0 && scroll_y >= range.start && scroll_y <= range.end
        })
    }

    /// Distance the pinned row is pushed down to hold its screen position
    pub fn pin_offset(&self, layout: &PageLayout, viewport: Viewport, scroll_y: f32) -> f32 {
        self.range(layout, viewport).map_or(0.0, |range| {
            (scroll_y - range.start).clamp(0.0, range.length())
        })
    }

    /// Scroll offset a settling gesture should come to rest on.
    ///
    /// Outside the pinned range the offset is returned unchanged.
    pub fn snap_target(&self, layout: &PageLayout, viewport: Viewport, scroll_y: f32) -> f32 {
        match self.range(layout, viewport) {
            Some(range) if scroll_y > range.start && scroll_y < range.end => {
                range.scroll_for(self.snap.apply(range.progress(scroll_y)))
            }
            _ => scroll_y,
        }
    }
}
