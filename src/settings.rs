//! Physics tuning and page integration settings
//!
//! Read from LocalStorage as JSON; every field has a default so partial
//! documents load.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Integrator constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration (pixels/tick²)
    pub gravity: f32,
    /// Vertical velocity assigned by a jump (negative is up)
    pub jump_impulse: f32,
    /// Horizontal speed assigned by an arrow key
    pub move_speed: f32,
    /// Horizontal velocity multiplier per tick (0..=1)
    pub friction: f32,
    /// Landing band below an obstacle top (pixels)
    pub support_tolerance: f32,
    /// Horizontal speeds below this snap to zero
    pub rest_epsilon: f32,
    pub body_width: f32,
    pub body_height: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            friction: FRICTION,
            support_tolerance: SUPPORT_TOLERANCE,
            rest_epsilon: REST_EPSILON,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
        }
    }
}

impl PhysicsTuning {
    /// Body bounding box size
    #[inline]
    pub fn body_size(&self) -> Vec2 {
        Vec2::new(self.body_width, self.body_height)
    }

    /// Replace out-of-range values with defaults
    ///
    /// Keeps the integrator free of NaN propagation and of a friction that
    /// would amplify velocity.
    pub fn validated(self) -> Self {
        let d = Self::default();
        let non_negative = |v: f32, fallback: f32| {
            if v.is_finite() && v >= 0.0 { v } else { fallback }
        };
        Self {
            gravity: non_negative(self.gravity, d.gravity),
            jump_impulse: if self.jump_impulse.is_finite() {
                self.jump_impulse
            } else {
                d.jump_impulse
            },
            move_speed: non_negative(self.move_speed, d.move_speed),
            friction: if self.friction.is_finite() && (0.0..=1.0).contains(&self.friction) {
                self.friction
            } else {
                d.friction
            },
            support_tolerance: non_negative(self.support_tolerance, d.support_tolerance),
            rest_epsilon: non_negative(self.rest_epsilon, d.rest_epsilon),
            body_width: non_negative(self.body_width, d.body_width),
            body_height: non_negative(self.body_height, d.body_height),
        }
    }
}

/// Page integration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: PhysicsTuning,
    /// CSS selector of the elements the body collides with
    pub obstacle_selector: String,
    /// Element id of the sprite the body drives
    pub sprite_id: String,
    /// Spawn column (pixels from the left edge)
    pub spawn_x: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: PhysicsTuning::default(),
            obstacle_selector: ".news-card".to_string(),
            sprite_id: "sleuth-sprite".to_string(),
            spawn_x: SPAWN_X,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sleuth_runner_settings";

    /// Parse settings from JSON; tuning is sanitised
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.validated();
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
