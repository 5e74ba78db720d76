//! Reversible scroll-toggled entrance
//!
//! Unlike a `RevealGroup`, a toggled reveal plays forward when its trigger
//! range is entered and runs backwards when the user scrolls back above it.
//! The About section's decorative shapes use this.

use crate::page::PageLayout;
use crate::section::{SectionId, Target};
use crate::viewport::Viewport;
use folio_animation::scroll_trigger::apply_toggle;
use folio_animation::{
    Edge, KeyframeProperties, Marker, Playhead, ScrollTrigger, ToggleAction, ToggleActions,
    ToggleTracker, Tween,
};
use folio_core::Millis;

#[derive(Clone, Debug)]
pub struct ToggledReveal {
    target: Target,
    trigger: ScrollTrigger,
    tracker: ToggleTracker,
    playhead: Playhead,
    children: Vec<Tween>,
    stagger_ms: u32,
}

impl ToggledReveal {
    pub fn new(
        target: impl Into<Target>,
        trigger: ScrollTrigger,
        actions: ToggleActions,
        children: Vec<Tween>,
        stagger_ms: u32,
    ) -> Self {
        let length = children
            .iter()
            .enumerate()
            .map(|(i, tween)| Millis::from(stagger_ms) * i as Millis + tween.end_ms())
            .max()
            .unwrap_or(0);
        Self {
            target: target.into(),
            trigger,
            tracker: ToggleTracker::new(actions),
            playhead: Playhead::new(length),
            children,
            stagger_ms,
        }
    }

    /// The About section's three floating shapes: rise 100px and fade in
    /// over one second, 200ms apart, once the section top passes 80% of the
    /// viewport. Scrolling back above that point plays them out again.
    pub fn float_shapes() -> Self {
        let shape = Tween::new(
            KeyframeProperties::opacity(0.0).with_translate_y(100.0),
            KeyframeProperties::opacity(1.0).with_translate_y(0.0),
            1000,
        );
        let trigger = ScrollTrigger {
            start: Marker::new(Edge::TOP, Edge::Fraction(0.8)),
            ..ScrollTrigger::default()
        };
        let actions = ToggleActions {
            on_enter: ToggleAction::Play,
            on_leave_back: ToggleAction::Reverse,
            ..ToggleActions::default()
        };
        Self::new(SectionId::About, trigger, actions, vec![shape; 3], 200)
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Feed a scroll sample; boundary crossings drive the playhead
    pub fn update(&mut self, layout: &PageLayout, scroll_y: f32, viewport: Viewport, now: Millis) {
        let Some(rect) = layout.document_rect(self.target) else {
            return;
        };
        let range = self.trigger.range(&rect, viewport.height);
        for action in self.tracker.update(&range, scroll_y) {
            tracing::trace!(region = %self.target, ?action, "toggle action");
            apply_toggle(&mut self.playhead, action, now);
        }
    }

    /// Playhead position in milliseconds
    pub fn position(&self, now: Millis) -> Millis {
        self.playhead.position(now)
    }

    pub fn sample(&self, index: usize, now: Millis) -> Option<KeyframeProperties> {
        let tween = self.children.get(index)?;
        let offset = Millis::from(self.stagger_ms) * index as Millis;
        Some(tween.sample(self.playhead.position(now).saturating_sub(offset)))
    }
}
