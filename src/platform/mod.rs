//! Platform abstraction layer
//!
//! Browser bindings for the simulation:
//! - Obstacle sampling from tagged DOM elements
//! - Keyboard, resize and focus events
//! - requestAnimationFrame loop with teardown
//! - Sprite placement
//!
//! Native builds have no platform layer; they drive [`crate::Simulation`]
//! directly with a [`crate::sim::StaticObstacles`] source.

#[cfg(target_arch = "wasm32")]
pub mod web;
