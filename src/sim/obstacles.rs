//! Obstacle registry
//!
//! Obstacles are snapshots of host-page geometry. The set is rebuilt from
//! its source on mount and on every resize; nothing about an obstacle is
//! tracked across rebuilds except its rectangle.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Ordered, immutable snapshot of obstacle rectangles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleSet {
    rects: Vec<Rect>,
}

impl ObstacleSet {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }
}

impl Deref for ObstacleSet {
    type Target = [Rect];

    fn deref(&self) -> &[Rect] {
        &self.rects
    }
}

impl FromIterator<Rect> for ObstacleSet {
    fn from_iter<T: IntoIterator<Item = Rect>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

/// Anything that can report the current collidable rectangles
///
/// Called synchronously; an empty answer is valid.
pub trait ObstacleSource {
    fn sample(&mut self) -> Vec<Rect>;
}

/// Fixed list of rectangles (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct StaticObstacles(pub Vec<Rect>);

impl ObstacleSource for StaticObstacles {
    fn sample(&mut self) -> Vec<Rect> {
        self.0.clone()
    }
}

impl<F> ObstacleSource for F
where
    F: FnMut() -> Vec<Rect>,
{
    fn sample(&mut self) -> Vec<Rect> {
        self()
    }
}

/// Holds the current snapshot and replaces it on refresh
#[derive(Debug, Clone, Default)]
pub struct ObstacleRegistry {
    current: ObstacleSet,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the snapshot from `source`, dropping the previous one
    ///
    /// Rectangles with non-finite coordinates or negative extents are
    /// skipped so the integrator only ever sees usable geometry.
    pub fn refresh(&mut self, source: &mut dyn ObstacleSource) -> &ObstacleSet {
        let rects: ObstacleSet = source
            .sample()
            .into_iter()
            .filter(|r| is_usable(r))
            .collect();
        log::debug!("Obstacle refresh: {} rects", rects.len());
        self.current = rects;
        &self.current
    }

    pub fn current(&self) -> &ObstacleSet {
        &self.current
    }
}

fn is_usable(r: &Rect) -> bool {
    [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite())
        && r.width >= 0.0
        && r.height >= 0.0
}
