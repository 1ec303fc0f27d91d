//! Deterministic simulation module
//!
//! All body physics lives here. This module must be pure and deterministic:
//! - Frame-count timestep only (no wall-clock scaling)
//! - Contact state recomputed from geometry every tick
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacles;
pub mod rect;
pub mod step;

pub use body::{Body, Contact, Facing};
pub use collision::{Contacts, detect_contacts, is_climbing, is_standing_on};
pub use obstacles::{ObstacleRegistry, ObstacleSet, ObstacleSource, StaticObstacles};
pub use rect::{Rect, Viewport};
pub use step::{step, step_tuned};
