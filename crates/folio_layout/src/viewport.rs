//! Browser viewport

use folio_core::Rect;
use serde::{Deserialize, Serialize};

/// Width at which the desktop layout takes over
pub const MD_BREAKPOINT: f32 = 768.0;

/// Visible window size in logical pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The viewport in its own coordinate space
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// True at or above the `md` breakpoint
    pub fn is_md(&self) -> bool {
        self.width >= MD_BREAKPOINT
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
