//! Scroll-scrubbed effects
//!
//! A scrub effect is a pure function of the scroll offset: the offset is
//! mapped to progress through a trigger range, and progress is mapped
//! linearly onto the property. No easing and no internal state.

use crate::page::PageLayout;
use crate::section::{SectionId, Target};
use crate::viewport::Viewport;
use folio_animation::{
    scrub, Edge, KeyframeProperties, Marker, ScrollRange, ScrollTrigger, TriggerEnd,
};

/// Distance over which the hero fades out completely
pub const HERO_FADE_DISTANCE: f32 = 500.0;

/// What the scroll range is measured against
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrubSource {
    /// A trigger resolved against a target's rect
    Element { target: Target, trigger: ScrollTrigger },
    /// Fixed document offsets
    Absolute(ScrollRange),
}

/// The property a scrub effect drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrubProperty {
    Opacity,
    TranslateY,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubEffect {
    pub source: ScrubSource,
    pub property: ScrubProperty,
    pub from: f32,
    pub to: f32,
}

impl ScrubEffect {
    pub fn new(source: ScrubSource, property: ScrubProperty, from: f32, to: f32) -> Self {
        Self {
            source,
            property,
            from,
            to,
        }
    }

    /// Every section brightens from 0.8 to full opacity while it crosses the
    /// viewport center
    pub fn section_opacity(id: SectionId) -> Self {
        let trigger = ScrollTrigger::new(
            Marker::new(Edge::TOP, Edge::CENTER),
            TriggerEnd::Marker(Marker::new(Edge::BOTTOM, Edge::CENTER)),
        );
        Self::new(
            ScrubSource::Element {
                target: id.into(),
                trigger,
            },
            ScrubProperty::Opacity,
            0.8,
            1.0,
        )
    }

    /// The About background drifts 100px down while the section is on screen
    pub fn about_drift() -> Self {
        Self::new(
            ScrubSource::Element {
                target: SectionId::About.into(),
                trigger: ScrollTrigger::default(),
            },
            ScrubProperty::TranslateY,
            0.0,
            100.0,
        )
    }

    /// The hero content fades out over the first 500px of scrolling
    pub fn hero_fade() -> Self {
        Self::new(
            ScrubSource::Absolute(ScrollRange {
                start: 0.0,
                end: HERO_FADE_DISTANCE,
            }),
            ScrubProperty::Opacity,
            1.0,
            0.0,
        )
    }

    /// Resolved scroll range, if the source is mounted
    pub fn range(&self, layout: &PageLayout, viewport: Viewport) -> Option<ScrollRange> {
        match self.source {
            ScrubSource::Element { target, trigger } => layout
                .document_rect(target)
                .map(|rect| trigger.range(&rect, viewport.height)),
            ScrubSource::Absolute(range) => Some(range),
        }
    }

    pub fn progress(&self, layout: &PageLayout, scroll_y: f32, viewport: Viewport) -> Option<f32> {
        self.range(layout, viewport)
            .map(|range| range.progress(scroll_y))
    }

    /// Property value at a scroll offset
    pub fn value(&self, layout: &PageLayout, scroll_y: f32, viewport: Viewport) -> Option<f32> {
        self.progress(layout, scroll_y, viewport)
            .map(|progress| scrub(self.from, self.to, progress))
    }

    /// Value as keyframe properties, for styling
    pub fn properties(
        &self,
        layout: &PageLayout,
        scroll_y: f32,
        viewport: Viewport,
    ) -> Option<KeyframeProperties> {
        let value = self.value(layout, scroll_y, viewport)?;
        Some(match self.property {
            ScrubProperty::Opacity => KeyframeProperties::opacity(value),
            ScrubProperty::TranslateY => KeyframeProperties::translate(0.0, value),
        })
    }
}
