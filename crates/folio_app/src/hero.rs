//! Hero scene parameters
//!
//! The hero backdrop is a distorted metallic sphere floating in a particle
//! field. Nothing is rasterized here: the scene is reduced to the material
//! parameters and per-frame pose a renderer would need. The material is the
//! page's one imperative theme consumer, so it follows the theme through a
//! subscription instead of reading it on render.

use folio_core::Millis;
use folio_theme::{Color, ColorScheme, SubscriptionId, ThemeState};
use std::cell::Cell;
use std::rc::Rc;

/// Period of the scroll-hint chevron's bob
pub const CHEVRON_PERIOD_MS: Millis = 1_500;
/// Peak vertical travel of the chevron
pub const CHEVRON_TRAVEL: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneMaterial {
    pub sphere_color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub distort: f32,
    pub distort_speed: f32,
    pub particle_color: Color,
    pub particle_opacity: f32,
    pub particle_size: f32,
}

impl SceneMaterial {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        let (sphere_color, roughness, metalness, clearcoat, particle_color) = match scheme {
            ColorScheme::Dark => (Color::from_hex(0x2429be), 0.2, 0.8, 0.0, Color::WHITE),
            ColorScheme::Light => (Color::from_hex(0x9edbdd), 3.0, 3.0, 0.4, Color::from_hex(0x768a8b)),
        };
        Self {
            sphere_color,
            roughness,
            metalness,
            clearcoat,
            clearcoat_roughness: 0.1,
            distort: 0.5,
            distort_speed: 2.0,
            particle_color,
            particle_opacity: 0.6,
            particle_size: 0.05,
        }
    }
}

/// Transform of the scene objects at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScenePose {
    pub sphere_rotation_x: f32,
    pub sphere_rotation_y: f32,
    pub sphere_y: f32,
    pub particles_rotation_y: f32,
}

/// Mounted hero scene
#[derive(Debug)]
pub struct HeroScene {
    material: Rc<Cell<SceneMaterial>>,
    subscription: Option<SubscriptionId>,
}

impl HeroScene {
    /// Mount the scene and start following theme changes
    pub fn mount(theme: &mut ThemeState) -> Self {
        let material = Rc::new(Cell::new(SceneMaterial::for_scheme(theme.get())));
        let observed = Rc::clone(&material);
        let subscription = theme.subscribe(move |scheme| {
            tracing::trace!(?scheme, "hero material updated");
            observed.set(SceneMaterial::for_scheme(scheme));
        });
        Self {
            material,
            subscription: Some(subscription),
        }
    }

    /// Stop following the theme. The last material is kept.
    pub fn unmount(&mut self, theme: &mut ThemeState) {
        if let Some(id) = self.subscription.take() {
            theme.unsubscribe(id);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn material(&self) -> SceneMaterial {
        self.material.get()
    }

    /// Pose `elapsed_ms` after mount
    pub fn pose(&self, elapsed_ms: Millis) -> ScenePose {
        let t = elapsed_ms as f32 / 1000.0;
        ScenePose {
            sphere_rotation_x: t * 0.2,
            sphere_rotation_y: t * 0.3,
            sphere_y: (t * 0.5).sin() * 0.3,
            particles_rotation_y: t * 0.05,
        }
    }
}

/// Chevron offset: down 10px and back once per period, linearly
pub fn chevron_bob(now: Millis) -> f32 {
    let phase = (now % CHEVRON_PERIOD_MS) as f32 / CHEVRON_PERIOD_MS as f32;
    let tri = if phase < 0.5 { phase * 2.0 } else { (1.0 - phase) * 2.0 };
    tri * CHEVRON_TRAVEL
}
