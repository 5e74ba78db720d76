//! Animation presets for the page's entrance animations
//!
//! Every section reveals its content with one of a small set of tweens. The
//! presets here carry the distances and durations the page uses so view code
//! only has to pick one and a delay.

use crate::easing::Easing;
use crate::keyframe::{KeyframeProperties, Tween};

/// Duration/easing pair used by section reveals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTiming {
    /// 600ms ease-out (skills, experience, education, contact)
    Quick,
    /// 800ms ease-out (about, section headings)
    Slow,
}

impl RevealTiming {
    pub fn duration_ms(self) -> u32 {
        match self {
            RevealTiming::Quick => 600,
            RevealTiming::Slow => 800,
        }
    }

    pub fn easing(self) -> Easing {
        Easing::EaseOut
    }
}

/// Pre-built tweens for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade in from transparent to opaque
    pub fn fade_in(duration_ms: u32) -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0),
            KeyframeProperties::opacity(1.0),
            duration_ms,
        )
    }

    /// Fade in while rising `distance` pixels into place
    pub fn fade_up(duration_ms: u32, distance: f32) -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0).with_translate_y(distance),
            KeyframeProperties::opacity(1.0).with_translate_y(0.0),
            duration_ms,
        )
    }

    /// Reveal tween for a timing preset
    pub fn reveal(timing: RevealTiming, distance: f32) -> Tween {
        Self::fade_up(timing.duration_ms(), distance).easing(timing.easing())
    }

    // ========================================================================
    // Slide animations
    // ========================================================================

    /// Slide in from the left with fade
    pub fn slide_in_left(duration_ms: u32, distance: f32) -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0).with_translate(-distance, 0.0),
            KeyframeProperties::opacity(1.0).with_translate(0.0, 0.0),
            duration_ms,
        )
    }

    /// Navigation bar entrance: drop 100px from above over 800ms
    pub fn drop_in() -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0).with_translate_y(-100.0),
            KeyframeProperties::opacity(1.0).with_translate_y(0.0),
            800,
        )
    }

    // ========================================================================
    // Progress animations
    // ========================================================================

    /// Skill bar fill from empty to `level` percent over one second
    pub fn grow_width(level: f32) -> Tween {
        Tween::new(
            KeyframeProperties::width_pct(0.0),
            KeyframeProperties::width_pct(level.clamp(0.0, 100.0)),
            1000,
        )
    }

    /// Horizontal rule drawing out from its center
    pub fn scale_x_in(duration_ms: u32) -> Tween {
        Tween::new(
            KeyframeProperties::default().with_scale_x(0.0),
            KeyframeProperties::default().with_scale_x(1.0),
            duration_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_timings() {
        assert_eq!(RevealTiming::Quick.duration_ms(), 600);
        assert_eq!(RevealTiming::Slow.duration_ms(), 800);

        let tween = AnimationPreset::reveal(RevealTiming::Slow, 50.0);
        assert_eq!(tween.duration_ms, 800);
        assert_eq!(tween.easing, Easing::EaseOut);
        assert_eq!(tween.from.translate_y, Some(50.0));
        assert_eq!(tween.from.opacity, Some(0.0));
    }

    #[test]
    fn test_drop_in_starts_above() {
        let tween = AnimationPreset::drop_in();
        assert_eq!(tween.sample(0).translate_y, Some(-100.0));
        assert_eq!(tween.sample(800).translate_y, Some(0.0));
    }

    #[test]
    fn test_grow_width_clamps_level() {
        let tween = AnimationPreset::grow_width(140.0);
        assert_eq!(tween.to.width_pct, Some(100.0));
        assert_eq!(tween.duration_ms, 1000);
    }

    #[test]
    fn test_slide_in_left_offsets_x() {
        let tween = AnimationPreset::slide_in_left(600, 50.0);
        assert_eq!(tween.from.translate_x, Some(-50.0));
        assert_eq!(tween.to.translate_x, Some(0.0));
    }
}
