//! Render projection: body state to sprite placement
//!
//! The sprite artwork faces left, so a right-facing body is drawn mirrored.
//! While climbing the sprite is turned on its side.

use crate::sim::{Body, Facing};

/// Where and how to draw the sprite this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePose {
    /// CSS `left` in pixels
    pub left: f32,
    /// CSS `top` in pixels
    pub top: f32,
    /// Flip horizontally
    pub mirrored: bool,
    /// Rotate 90 degrees
    pub rotated: bool,
}

impl SpritePose {
    pub fn from_body(body: &Body) -> Self {
        Self {
            left: body.pos.x,
            top: body.pos.y,
            mirrored: body.facing == Facing::Right,
            rotated: body.climbing,
        }
    }

    /// Value for the outer element's `transform`
    pub fn flip_transform(&self) -> &'static str {
        if self.mirrored { "scaleX(-1)" } else { "scaleX(1)" }
    }

    /// Value for the inner image's `transform`
    pub fn tilt_transform(&self) -> &'static str {
        if self.rotated { "rotate(90deg)" } else { "none" }
    }
}
