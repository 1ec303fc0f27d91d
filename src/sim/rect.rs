//! Axis-aligned rectangle geometry in viewport pixels
//!
//! Y grows downward, as in the browser: `top` is the smaller y.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, `(x, y)` is its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Open-interval overlap of the horizontal extents (touching edges don't count)
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Open-interval overlap of the vertical extents
    #[inline]
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.bottom() > other.top() && self.top() < other.bottom()
    }

    /// Boxes share interior area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }
}

/// Size of the display area the body lives in
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest legal x for a box of `body_width`; never negative, so a
    /// viewport narrower than the body pins it to the left edge
    pub fn max_x(&self, body_width: f32) -> f32 {
        (self.width - body_width).max(0.0)
    }

    /// Largest legal y for a box of `body_height` (the floor)
    pub fn floor_y(&self, body_height: f32) -> f32 {
        self.height - body_height
    }
}
