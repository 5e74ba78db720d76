//! Keyframe properties and single-segment tweens
//!
//! A `Tween` moves a set of `KeyframeProperties` from one value to another
//! over a fixed duration, after an optional delay. Entrance animations are
//! all two-keyframe tweens, so there is no multi-keyframe track here.

use crate::easing::Easing;
use folio_core::Millis;

/// Properties that can be animated
///
/// Unset properties are left at the element's resting style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyframeProperties {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Horizontal scale factor
    pub scale_x: Option<f32>,
    /// Width as a percentage of the parent (progress bars)
    pub width_pct: Option<f32>,
}

impl KeyframeProperties {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Create properties with only a percentage width
    pub fn width_pct(value: f32) -> Self {
        Self {
            width_pct: Some(value),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set translation
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    /// Builder: set vertical translation
    pub fn with_translate_y(mut self, y: f32) -> Self {
        self.translate_y = Some(y);
        self
    }

    /// Builder: set horizontal scale
    pub fn with_scale_x(mut self, value: f32) -> Self {
        self.scale_x = Some(value);
        self
    }

    /// Interpolate between two property sets.
    ///
    /// A property set on only one side holds that side's value.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            scale_x: lerp_opt(self.scale_x, other.scale_x, t),
            width_pct: lerp_opt(self.width_pct, other.width_pct, t),
        }
    }

    /// Resolved opacity (unset = fully opaque)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Render as inline CSS declarations. Unset properties produce nothing.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if let Some(opacity) = self.opacity {
            decls.push(format!("opacity: {}", round3(opacity)));
        }

        let mut transforms = Vec::new();
        if self.translate_x.is_some() || self.translate_y.is_some() {
            transforms.push(format!(
                "translate({}px, {}px)",
                round3(self.translate_x.unwrap_or(0.0)),
                round3(self.translate_y.unwrap_or(0.0))
            ));
        }
        if let Some(scale_x) = self.scale_x {
            transforms.push(format!("scaleX({})", round3(scale_x)));
        }
        if !transforms.is_empty() {
            decls.push(format!("transform: {}", transforms.join(" ")));
        }

        if let Some(width) = self.width_pct {
            decls.push(format!("width: {}%", round3(width)));
        }
        decls.join("; ")
    }
}

fn lerp_opt(from: Option<f32>, to: Option<f32>, t: f32) -> Option<f32> {
    match (from, to) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

fn round3(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

/// A two-keyframe animation with delay and easing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: KeyframeProperties,
    pub to: KeyframeProperties,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: KeyframeProperties, to: KeyframeProperties, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0,
            easing: Easing::EaseOut,
        }
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Time from start at which the tween settles on `to`
    pub fn end_ms(&self) -> Millis {
        self.delay_ms as Millis + self.duration_ms as Millis
    }

    /// Linear progress (before easing) at `elapsed_ms` since the tween started
    pub fn progress(&self, elapsed_ms: Millis) -> f32 {
        let delay = self.delay_ms as Millis;
        if elapsed_ms <= delay {
            return 0.0;
        }
        if self.duration_ms == 0 || elapsed_ms >= self.end_ms() {
            return 1.0;
        }
        (elapsed_ms - delay) as f32 / self.duration_ms as f32
    }

    /// Interpolated properties at `elapsed_ms` since the tween started
    pub fn sample(&self, elapsed_ms: Millis) -> KeyframeProperties {
        let progress = self.progress(elapsed_ms);
        if progress <= 0.0 {
            return self.from;
        }
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(progress))
    }

    pub fn is_finished(&self, elapsed_ms: Millis) -> bool {
        elapsed_ms >= self.end_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade_up() -> Tween {
        Tween::new(
            KeyframeProperties::opacity(0.0).with_translate_y(50.0),
            KeyframeProperties::opacity(1.0).with_translate_y(0.0),
            800,
        )
    }

    #[test]
    fn test_holds_from_during_delay() {
        let tween = fade_up().delay(300);
        assert_eq!(tween.sample(0), tween.from);
        assert_eq!(tween.sample(300), tween.from);
        assert!(tween.sample(301).resolved_opacity() > 0.0);
    }

    #[test]
    fn test_settles_on_to_at_end() {
        let tween = fade_up().delay(100);
        assert_eq!(tween.end_ms(), 900);
        assert!(!tween.is_finished(899));
        assert_eq!(tween.sample(900), tween.to);
        assert_eq!(tween.sample(10_000), tween.to);
    }

    #[test]
    fn test_linear_midpoint() {
        let tween = fade_up().easing(Easing::Linear);
        let mid = tween.sample(400);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.translate_y, Some(25.0));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tween = Tween::new(
            KeyframeProperties::opacity(0.0),
            KeyframeProperties::opacity(1.0),
            0,
        );
        assert_eq!(tween.sample(0).opacity, Some(0.0));
        assert_eq!(tween.sample(1).opacity, Some(1.0));
    }

    #[test]
    fn test_lerp_one_sided_property_holds() {
        let a = KeyframeProperties::opacity(0.0).with_scale_x(0.5);
        let b = KeyframeProperties::opacity(1.0);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.scale_x, Some(0.5));
        assert_eq!(mid.opacity, Some(0.5));
    }

    #[test]
    fn test_css_output() {
        let props = KeyframeProperties::opacity(0.25).with_translate(-50.0, 0.0);
        assert_eq!(
            props.to_css(),
            "opacity: 0.25; transform: translate(-50px, 0px)"
        );
        assert_eq!(KeyframeProperties::width_pct(90.0).to_css(), "width: 90%");
        assert_eq!(KeyframeProperties::default().to_css(), "");
    }
}
