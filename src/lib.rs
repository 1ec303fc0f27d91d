//! Sleuth Runner - a platformer detective that roams a news page
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body, obstacles, collisions, stepping)
//! - `input`: Keyboard to velocity intent
//! - `scheduler`: Owned simulation context driven once per display frame
//! - `projection`: Body state to sprite pose
//! - `platform`: Browser bindings (DOM obstacles, keys, animation frames)
//! - `settings`: Data-driven physics tuning

pub mod input;
pub mod platform;
pub mod projection;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use input::{InputController, Key};
pub use projection::SpritePose;
pub use scheduler::{CancelToken, FrameClock, Simulation};
pub use settings::{PhysicsTuning, Settings};

/// Physics configuration constants
///
/// All velocities are in pixels per tick, where one tick is one display
/// frame. Motion is never scaled by wall-clock time.
pub mod consts {
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity assigned by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Horizontal velocity assigned by an arrow key
    pub const MOVE_SPEED: f32 = 5.0;
    /// Horizontal velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.8;
    /// Depth below an obstacle top within which the body lands on it
    pub const SUPPORT_TOLERANCE: f32 = 20.0;
    /// Horizontal speeds below this snap to zero
    pub const REST_EPSILON: f32 = 0.01;

    /// Body bounding box
    pub const BODY_WIDTH: f32 = 100.0;
    pub const BODY_HEIGHT: f32 = 150.0;

    /// Spawn column, the body starts standing on the viewport floor
    pub const SPAWN_X: f32 = 50.0;

    /// Milliseconds per normalized frame (~60 Hz)
    pub const FRAME_MS: f64 = 16.0;
}
