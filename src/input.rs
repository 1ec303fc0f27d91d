//! Keyboard input controller
//!
//! Translates key-down/key-up edges into velocity intent on the body.
//! There is no queue: each edge writes straight into the body's velocity and
//! the next tick consumes it, so the latest event wins.
//!
//! Pressing both arrows resolves to whichever key-down arrived last, and
//! releasing either arrow stops horizontal movement.

use serde::{Deserialize, Serialize};

use crate::settings::PhysicsTuning;
use crate::sim::Body;

/// Logical keys the controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    const COUNT: usize = 3;

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" | " " => Some(Key::Jump),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Jump => 2,
        }
    }
}

/// Edge-triggered key handler
#[derive(Debug, Clone)]
pub struct InputController {
    move_speed: f32,
    jump_impulse: f32,
    held: [bool; Key::COUNT],
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(&PhysicsTuning::default())
    }
}

impl InputController {
    pub fn new(tuning: &PhysicsTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            jump_impulse: tuning.jump_impulse,
            held: [false; Key::COUNT],
        }
    }

    /// Handle a key-down edge. Auto-repeat while held is ignored.
    ///
    /// Returns true if the body's velocity was written.
    pub fn key_down(&mut self, key: Key, body: &mut Body) -> bool {
        let slot = &mut self.held[key.index()];
        if *slot {
            return false;
        }
        *slot = true;

        match key {
            Key::Left => {
                body.vel.x = -self.move_speed;
                true
            }
            Key::Right => {
                body.vel.x = self.move_speed;
                true
            }
            Key::Jump => {
                // No jumping off a wall
                if body.climbing {
                    log::trace!("Jump ignored while climbing");
                    false
                } else {
                    body.vel.y = self.jump_impulse;
                    true
                }
            }
        }
    }

    /// Handle a key-up edge. Releasing either arrow stops horizontal motion.
    pub fn key_up(&mut self, key: Key, body: &mut Body) -> bool {
        self.held[key.index()] = false;
        match key {
            Key::Left | Key::Right => {
                body.vel.x = 0.0;
                true
            }
            Key::Jump => false,
        }
    }

    /// Forget held keys (focus loss)
    pub fn release_all(&mut self) {
        self.held = [false; Key::COUNT];
    }
}
