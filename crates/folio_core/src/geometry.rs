//! Geometry primitives in logical pixels
//!
//! Document space has its origin at the top of the page; viewport space has
//! its origin at the top of the visible window. Converting between the two is
//! a vertical translation by the scroll offset.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to a Rect at the origin (0, 0)
    pub const fn to_rect(self) -> Rect {
        Rect {
            origin: Point::ZERO,
            size: self,
        }
    }
}

/// Axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Shift the rect by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x() + dx, self.y() + dy, self.width(), self.height())
    }

    /// Grow (positive margin) or shrink (negative margin) on all four sides.
    ///
    /// Shrinking never produces a negative size; an over-shrunk rect collapses
    /// to zero size around its center.
    pub fn inset(&self, margin: f32) -> Rect {
        let width = self.width() + 2.0 * margin;
        let height = self.height() + 2.0 * margin;
        let cx = self.x() + self.width() / 2.0;
        let cy = self.y() + self.height() / 2.0;
        let width = width.max(0.0);
        let height = height.max(0.0);
        Rect::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Check whether two rects overlap.
    ///
    /// Edges that merely touch count as intersecting, matching the way
    /// intersection observers report a zero-area hit at the boundary.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// True if the horizontal line at `y` lies within [top, bottom]
    pub fn straddles_y(&self, y: f32) -> bool {
        self.top() <= y && self.bottom() >= y
    }
}
