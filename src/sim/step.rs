//! Per-frame integrator
//!
//! Advances the body by one tick. Motion is frame-count based: one call is
//! one tick regardless of how much wall-clock time has elapsed.

use glam::Vec2;

use super::body::{Body, Facing};
use super::collision::detect_contacts;
use super::rect::{Rect, Viewport};
use crate::settings::PhysicsTuning;

/// Advance `prev` one tick with the default tuning
pub fn step(prev: &Body, obstacles: &[Rect], viewport: Viewport) -> Body {
    step_tuned(prev, obstacles, viewport, &PhysicsTuning::default())
}

/// Advance `prev` one tick
///
/// Order of operations:
/// 1. Move by the previous velocity (semi-implicit Euler, no substeps)
/// 2. Decay horizontal velocity by friction
/// 3. Add gravity to vertical velocity
/// 4. Land on the last obstacle whose top the bottom edge reached
/// 5. Flag climbing if the box overlaps any obstacle
/// 6. Airborne: gravity again. Climbing or supported: no extra gravity
/// 7. Clamp to the viewport sides and floor
/// 8. Update facing from the resolved horizontal velocity
pub fn step_tuned(
    prev: &Body,
    obstacles: &[Rect],
    viewport: Viewport,
    tuning: &PhysicsTuning,
) -> Body {
    let size = tuning.body_size();

    let mut pos = prev.pos + prev.vel;
    let mut vel = Vec2::new(prev.vel.x * tuning.friction, prev.vel.y + tuning.gravity);
    if vel.x.abs() < tuning.rest_epsilon {
        vel.x = 0.0;
    }

    let candidate = Rect::new(pos.x, pos.y, size.x, size.y);
    let contacts = detect_contacts(&candidate, obstacles, tuning.support_tolerance);

    let mut supported = false;
    if let Some(surface) = contacts.support {
        pos.y = surface.top() - size.y;
        vel.y = 0.0;
        supported = true;
    }

    // Climbing slides down the side at single gravity
    let climbing = contacts.climbing;
    if !supported && !climbing {
        vel.y += tuning.gravity;
    }

    let max_x = viewport.max_x(size.x);
    if pos.x < 0.0 {
        pos.x = 0.0;
        vel.x = 0.0;
    } else if pos.x > max_x {
        pos.x = max_x;
        vel.x = 0.0;
    }

    // Reaching the floor counts as standing on it
    let floor = viewport.floor_y(size.y);
    if pos.y >= floor {
        pos.y = floor;
        vel.y = 0.0;
        supported = true;
    }

    Body {
        pos,
        vel,
        facing: Facing::from_velocity(vel.x, prev.facing),
        climbing,
        supported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::body::Contact;

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);
    const LEDGE: Rect = Rect::new(300.0, 500.0, 200.0, 20.0);

    fn body(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        let mut b = Body::at(Vec2::new(x, y));
        b.vel = Vec2::new(vx, vy);
        b
    }

    fn run(mut b: Body, obstacles: &[Rect], ticks: usize) -> Body {
        for _ in 0..ticks {
            b = step(&b, obstacles, VIEWPORT);
        }
        b
    }

    #[test]
    fn test_airborne_gravity_compounds() {
        let next = step(&body(100.0, 0.0, 0.0, 0.0), &[], VIEWPORT);
        assert_eq!(next.vel.y, 2.0 * GRAVITY);
        // Position moved by the previous (zero) velocity
        assert_eq!(next.pos.y, 0.0);
        assert_eq!(next.contact(), Contact::Airborne);
    }

    #[test]
    fn test_rest_on_obstacle_is_idempotent() {
        let resting = body(300.0, 350.0, 0.0, 0.0);
        let next = step(&resting, &[LEDGE], VIEWPORT);
        assert_eq!(next.pos, resting.pos);
        assert_eq!(next.vel, Vec2::ZERO);
        assert!(next.supported);
        assert!(!next.climbing);

        let later = run(next, &[LEDGE], 100);
        assert_eq!(later.pos, resting.pos);
        assert_eq!(later.vel, Vec2::ZERO);
    }

    #[test]
    fn test_lands_on_ledge() {
        let b = run(body(300.0, 0.0, 0.0, 0.0), &[LEDGE], 200);
        assert_eq!(b.pos.y, 350.0);
        assert_eq!(b.vel.y, 0.0);
        assert_eq!(b.contact(), Contact::Supported);
    }

    #[test]
    fn test_landing_snaps_to_top() {
        // Bottom lands 12px into the ledge
        let next = step(&body(300.0, 350.0, 0.0, 12.0), &[LEDGE], VIEWPORT);
        assert_eq!(next.pos.y, 350.0);
        assert_eq!(next.vel.y, 0.0);
        assert!(next.supported);
        // Still overlapped on the candidate box
        assert!(next.climbing);
    }

    #[test]
    fn test_friction_decays_to_zero() {
        let mut b = body(100.0, 450.0, MOVE_SPEED, 0.0);
        let mut last = b.vel.x.abs();
        for _ in 0..200 {
            b = step(&b, &[], VIEWPORT);
            let speed = b.vel.x.abs();
            assert!(speed < last || speed == 0.0);
            last = speed;
        }
        assert_eq!(b.vel.x, 0.0);
        // 5 + 4 + 3.2 + ... converges below 25px
        assert!(b.pos.x > 100.0 && b.pos.x < 125.0);
    }

    #[test]
    fn test_floor_clamp() {
        let b = run(body(100.0, 0.0, 0.0, -30.0), &[], 300);
        assert_eq!(b.pos.y + BODY_HEIGHT, VIEWPORT.height);
        assert_eq!(b.vel.y, 0.0);
        assert!(b.supported);

        // Resting on the floor stays put
        let again = step(&b, &[], VIEWPORT);
        assert_eq!(again.pos, b.pos);
        assert_eq!(again.vel.y, 0.0);
    }

    #[test]
    fn test_side_clamps() {
        let mut b = body(600.0, 450.0, 0.0, 0.0);
        for _ in 0..20 {
            b.vel.x = 50.0;
            b = step(&b, &[], VIEWPORT);
        }
        assert_eq!(b.pos.x, VIEWPORT.width - BODY_WIDTH);
        assert_eq!(b.vel.x, 0.0);

        let b = step(&body(10.0, 450.0, -50.0, 0.0), &[], VIEWPORT);
        assert_eq!(b.pos.x, 0.0);
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn test_climbing_gets_single_gravity() {
        // Box straddles the ledge's left side, below its top
        let b = body(250.0, 400.0, 0.0, 0.0);
        let next = step(&b, &[LEDGE], VIEWPORT);
        assert!(next.climbing);
        assert!(!next.supported);
        assert_eq!(next.vel.y, GRAVITY);
        assert_eq!(next.contact(), Contact::Climbing);

        let sliding = step(&body(250.0, 400.0, 0.0, 3.0), &[LEDGE], VIEWPORT);
        assert_eq!(sliding.vel.y, 3.0 + GRAVITY);
    }

    #[test]
    fn test_climbing_body_slides_off_the_side() {
        // Drifts sideways into a card's side near the top of the screen
        let card = Rect::new(300.0, 100.0, 200.0, 20.0);
        let mut b = body(195.0, 0.0, 10.0, 0.0);
        let mut climbed = false;
        for _ in 0..500 {
            b = step(&b, &[card], VIEWPORT);
            climbed |= b.climbing;
        }
        assert!(climbed);
        assert!(!b.climbing);
        assert_eq!(b.pos.y, VIEWPORT.height - BODY_HEIGHT);
        assert!(b.supported);
    }

    #[test]
    fn test_climbing_is_not_sticky() {
        let climbing = step(&body(250.0, 400.0, 0.0, 0.0), &[LEDGE], VIEWPORT);
        assert!(climbing.climbing);
        // Same body with the ledge gone is airborne again
        let free = step(&climbing, &[], VIEWPORT);
        assert!(!free.climbing);
        assert_eq!(free.vel.y, climbing.vel.y + 2.0 * GRAVITY);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let mut b = body(400.0, 450.0, -5.0, 0.0);
        b.facing = Facing::Right;
        let b = step(&b, &[], VIEWPORT);
        assert_eq!(b.facing, Facing::Left);

        // Decays to zero, facing sticks
        let b = run(b, &[], 200);
        assert_eq!(b.vel.x, 0.0);
        assert_eq!(b.facing, Facing::Left);
    }

    #[test]
    fn test_wall_clamp_keeps_facing() {
        let mut b = body(0.0, 450.0, -5.0, 0.0);
        b.facing = Facing::Right;
        let b = step(&b, &[], VIEWPORT);
        assert_eq!(b.vel.x, 0.0);
        assert_eq!(b.facing, Facing::Right);
    }

    #[test]
    fn test_degenerate_viewport() {
        let b = step(&body(10.0, 10.0, 3.0, 0.0), &[], Viewport::new(0.0, 0.0));
        assert_eq!(b.pos.x, 0.0);
        assert_eq!(b.pos.y, -BODY_HEIGHT);
        assert!(b.supported);
    }

    #[test]
    fn test_tuning_is_honoured() {
        let tuning = PhysicsTuning {
            gravity: 1.0,
            ..Default::default()
        };
        let next = step_tuned(&body(0.0, 0.0, 0.0, 0.0), &[], VIEWPORT, &tuning);
        assert_eq!(next.vel.y, 2.0);
    }
}
