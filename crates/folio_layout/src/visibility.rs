//! One-shot viewport visibility
//!
//! Each observed target holds a two-state cell. The only transition is
//! `Unseen -> Seen`, taken the first time the target's rect intersects the
//! viewport adjusted by the target's margin.

use crate::page::PageLayout;
use crate::section::Target;
use crate::viewport::Viewport;
use rustc_hash::FxHashMap;

/// Margin applied to the viewport before the intersection test.
///
/// Positive values grow the viewport (fire early), negative values shrink it
/// (the target must be that far inside).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMargin(pub f32);

impl RootMargin {
    /// The site's section margin: 100px inside the viewport
    pub const SECTION: RootMargin = RootMargin(-100.0);
    pub const ZERO: RootMargin = RootMargin(0.0);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Unseen,
    Seen,
}

#[derive(Clone, Copy, Debug)]
struct Observation {
    margin: RootMargin,
    state: Visibility,
}

#[derive(Clone, Debug, Default)]
pub struct VisibilityTracker {
    observed: FxHashMap<Target, Observation>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing a target. Re-observing keeps an already seen state.
    pub fn observe(&mut self, target: impl Into<Target>, margin: RootMargin) {
        self.observed
            .entry(target.into())
            .and_modify(|obs| obs.margin = margin)
            .or_insert(Observation {
                margin,
                state: Visibility::Unseen,
            });
    }

    pub fn is_observed(&self, target: impl Into<Target>) -> bool {
        self.observed.contains_key(&target.into())
    }

    /// Evaluate every unseen target. Returns the targets that became seen on
    /// this sample, sorted.
    pub fn update(&mut self, layout: &PageLayout, scroll_y: f32, viewport: Viewport) -> Vec<Target> {
        let mut revealed = Vec::new();
        for (target, obs) in self.observed.iter_mut() {
            if obs.state == Visibility::Seen {
                continue;
            }
            let Some(rect) = layout.bounding_rect(*target, scroll_y) else {
                continue;
            };
            let root = viewport.rect().inset(obs.margin.0);
            if root.width() > 0.0 && root.height() > 0.0 && rect.intersects(&root) {
                obs.state = Visibility::Seen;
                tracing::debug!("VisibilityTracker - `{}` revealed at scroll {}", target, scroll_y);
                revealed.push(*target);
            }
        }
        revealed.sort();
        revealed
    }

    pub fn visibility(&self, target: impl Into<Target>) -> Visibility {
        self.observed
            .get(&target.into())
            .map_or(Visibility::Unseen, |obs| obs.state)
    }

    pub fn is_seen(&self, target: impl Into<Target>) -> bool {
        self.visibility(target) == Visibility::Seen
    }

    /// Every seen target, sorted
    pub fn seen(&self) -> Vec<Target> {
        let mut seen: Vec<Target> = self
            .observed
            .iter()
            .filter(|(_, obs)| obs.state == Visibility::Seen)
            .map(|(target, _)| *target)
            .collect();
        seen.sort();
        seen
    }
}
