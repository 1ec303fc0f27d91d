//! Physics body state
//!
//! The body is a fixed-size box. Everything the renderer and input layer
//! need to know about it is in [`Body`]; it is replaced wholesale every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, Viewport};

/// Horizontal facing direction, sticky when the body stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal velocity; zero keeps `previous`
    pub fn from_velocity(vx: f32, previous: Facing) -> Facing {
        if vx > 0.0 {
            Facing::Right
        } else if vx < 0.0 {
            Facing::Left
        } else {
            previous
        }
    }
}

/// Level-triggered contact state, derived from geometry each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Nothing underneath, gravity applies
    Airborne,
    /// Resting on an obstacle top or the viewport floor
    Supported,
    /// Pressed into the side of an obstacle
    Climbing,
}

/// The simulated body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left of the bounding box
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub facing: Facing,
    /// Overlapping an obstacle side this tick
    pub climbing: bool,
    /// Standing on an obstacle or the floor this tick
    #[serde(default)]
    pub supported: bool,
}

impl Body {
    /// A body at rest at `pos`, facing right
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::default(),
            climbing: false,
            supported: false,
        }
    }

    /// Spawn standing on the viewport floor at column `x`
    pub fn spawn(x: f32, viewport: Viewport, size: Vec2) -> Self {
        let x = x.clamp(0.0, viewport.max_x(size.x));
        let mut body = Self::at(Vec2::new(x, viewport.floor_y(size.y)));
        body.supported = true;
        body
    }

    /// Bounding box for a body of `size`
    pub fn bounds(&self, size: Vec2) -> Rect {
        Rect::new(self.pos.x, self.pos.y, size.x, size.y)
    }

    /// Contact classification; support wins over climbing on a landing tick
    pub fn contact(&self) -> Contact {
        if self.supported {
            Contact::Supported
        } else if self.climbing {
            Contact::Climbing
        } else {
            Contact::Airborne
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_facing_is_sticky() {
        assert_eq!(Facing::from_velocity(1.0, Facing::Left), Facing::Right);
        assert_eq!(Facing::from_velocity(-0.1, Facing::Right), Facing::Left);
        assert_eq!(Facing::from_velocity(0.0, Facing::Left), Facing::Left);
        assert_eq!(Facing::from_velocity(0.0, Facing::Right), Facing::Right);
    }

    #[test]
    fn test_spawn_on_floor() {
        let size = Vec2::new(BODY_WIDTH, BODY_HEIGHT);
        let body = Body::spawn(SPAWN_X, Viewport::new(800.0, 600.0), size);
        assert_eq!(body.pos, Vec2::new(50.0, 450.0));
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.contact(), Contact::Supported);

        // Spawn column is pulled back inside a tiny viewport
        let body = Body::spawn(SPAWN_X, Viewport::new(120.0, 600.0), size);
        assert_eq!(body.pos.x, 20.0);
    }

    #[test]
    fn test_contact_priority() {
        let mut body = Body::at(Vec2::ZERO);
        assert_eq!(body.contact(), Contact::Airborne);
        body.climbing = true;
        assert_eq!(body.contact(), Contact::Climbing);
        body.supported = true;
        assert_eq!(body.contact(), Contact::Supported);
    }
}
