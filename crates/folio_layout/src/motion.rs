//! Staggered entrance animations
//!
//! A `RevealGroup` is bound to one observed target. When the target is first
//! seen the container becomes visible at once and each child plays its tween,
//! offset by the group's initial delay plus its stagger slot. Until then every
//! child samples its initial (offset and transparent) style.

use crate::section::Target;
use crate::visibility::RootMargin;
use folio_animation::{KeyframeProperties, Tween};
use folio_core::Millis;

/// Direction for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Animate first to last
    #[default]
    Forward,
    /// Animate last to first
    Reverse,
    /// Animate from center outward
    FromCenter,
}

/// Configuration for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay between each child's animation start (ms)
    pub delay_ms: u32,
    /// Direction of stagger
    pub direction: StaggerDirection,
    /// Optional: limit stagger to first N items
    pub limit: Option<usize>,
}

impl StaggerConfig {
    /// Create a new stagger config with delay between items
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Stagger from center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Limit stagger to first N items
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Calculate delay for a specific child index
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                center.abs_diff(index)
            }
        };

        let capped_index = match self.limit {
            Some(limit) => effective_index.min(limit),
            None => effective_index,
        };

        self.delay_ms * capped_index as u32
    }
}

/// Children of one section that enter together once it is seen
#[derive(Clone, Debug)]
pub struct RevealGroup {
    trigger: Target,
    margin: RootMargin,
    initial_delay_ms: u32,
    stagger: StaggerConfig,
    children: Vec<Tween>,
    revealed_at: Option<Millis>,
}

impl RevealGroup {
    pub fn new(trigger: impl Into<Target>, stagger: StaggerConfig) -> Self {
        Self {
            trigger: trigger.into(),
            margin: RootMargin::SECTION,
            initial_delay_ms: 0,
            stagger,
            children: Vec::new(),
            revealed_at: None,
        }
    }

    /// Visibility margin for the trigger (defaults to the section margin)
    pub fn margin(mut self, margin: RootMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Delay before the first child starts
    pub fn initial_delay(mut self, delay_ms: u32) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    /// Append a child. Order of calls is stagger order.
    pub fn child(mut self, tween: Tween) -> Self {
        self.children.push(tween);
        self
    }

    /// Append `count` copies of the same child tween
    pub fn children(mut self, tween: Tween, count: usize) -> Self {
        self.children.extend(std::iter::repeat(tween).take(count));
        self
    }

    pub fn trigger(&self) -> Target {
        self.trigger
    }

    pub fn root_margin(&self) -> RootMargin {
        self.margin
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Start the entrance. Only the first call has any effect.
    pub fn reveal(&mut self, now: Millis) {
        if self.revealed_at.is_none() {
            tracing::trace!(trigger = %self.trigger, now, "reveal group started");
            self.revealed_at = Some(now);
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// The container switches to its visible state instantly
    pub fn container_visible(&self) -> bool {
        self.is_revealed()
    }

    /// Start offset of a child relative to the reveal
    pub fn child_offset(&self, index: usize) -> u32 {
        self.initial_delay_ms + self.stagger.delay_for_index(index, self.children.len())
    }

    /// Style of a child at `now`
    pub fn sample(&self, index: usize, now: Millis) -> Option<KeyframeProperties> {
        let tween = self.children.get(index)?;
        let Some(revealed_at) = self.revealed_at else {
            return Some(tween.from);
        };
        let elapsed = now
            .saturating_sub(revealed_at)
            .saturating_sub(Millis::from(self.child_offset(index)));
        Some(tween.sample(elapsed))
    }

    /// True once every child has reached its resting style
    pub fn is_settled(&self, now: Millis) -> bool {
        let Some(revealed_at) = self.revealed_at else {
            return false;
        };
        let elapsed = now.saturating_sub(revealed_at);
        self.children.iter().enumerate().all(|(i, tween)| {
            tween.is_finished(elapsed.saturating_sub(Millis::from(self.child_offset(i))))
        })
    }
}
