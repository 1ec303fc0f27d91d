//! Owned simulation context and frame pacing
//!
//! A [`Simulation`] is created when the animated view mounts and dropped
//! when it unmounts. The host calls [`Simulation::frame`] once per display
//! refresh; resize and key handlers write into the same context between
//! frames. Everything runs on one thread, so no locking is involved.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::FRAME_MS;
use crate::input::{InputController, Key};
use crate::projection::SpritePose;
use crate::settings::{PhysicsTuning, Settings};
use crate::sim::{
    Body, Contact, ObstacleRegistry, ObstacleSet, ObstacleSource, Viewport, step_tuned,
};

/// Tracks frame timestamps
///
/// Elapsed time is measured and exposed but never scales motion.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    /// Elapsed time of the last frame in ~16 ms units
    delta_ticks: f64,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            last_time: None,
            delta_ticks: 1.0,
            frames: 0,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `time_ms` (host timestamp)
    pub fn record(&mut self, time_ms: f64) {
        self.delta_ticks = match self.last_time {
            Some(last) => (time_ms - last) / FRAME_MS,
            None => 1.0,
        };
        self.last_time = Some(time_ms);
        self.frames += 1;
    }

    pub fn delta_ticks(&self) -> f64 {
        self.delta_ticks
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Shared stop flag for a frame loop
///
/// Clones observe the same flag. Once cancelled a loop schedules nothing
/// further.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// The body, its surroundings and its input, owned by one view
#[derive(Debug, Clone)]
pub struct Simulation {
    body: Body,
    viewport: Viewport,
    registry: ObstacleRegistry,
    input: InputController,
    tuning: PhysicsTuning,
    clock: FrameClock,
    last_contact: Contact,
}

impl Simulation {
    /// Create the context on mount: sample obstacles and spawn the body on
    /// the floor at the configured column
    pub fn mount(
        viewport: Viewport,
        source: &mut dyn ObstacleSource,
        settings: &Settings,
    ) -> Self {
        let tuning = settings.tuning.validated();
        let body = Body::spawn(settings.spawn_x, viewport, tuning.body_size());
        let mut registry = ObstacleRegistry::new();
        registry.refresh(source);

        log::info!(
            "Mounted in {}x{} viewport with {} obstacles",
            viewport.width,
            viewport.height,
            registry.current().len()
        );

        Self {
            body,
            viewport,
            registry,
            input: InputController::new(&tuning),
            tuning,
            clock: FrameClock::new(),
            last_contact: body.contact(),
        }
    }

    /// Replace the body (tests and scripted scenes)
    pub fn with_body(mut self, body: Body) -> Self {
        self.last_contact = body.contact();
        self.body = body;
        self
    }

    /// One display frame: exactly one integrator step
    pub fn frame(&mut self, time_ms: f64) -> &Body {
        self.clock.record(time_ms);
        // Stalled tabs resume without catching up
        if self.clock.delta_ticks() > 2.0 {
            log::trace!("Frame gap of {:.1} ticks, stepping once", self.clock.delta_ticks());
        }
        self.tick()
    }

    /// One integrator step without touching the clock
    pub fn tick(&mut self) -> &Body {
        self.body = step_tuned(&self.body, self.registry.current(), self.viewport, &self.tuning);

        let contact = self.body.contact();
        if contact != self.last_contact {
            log::trace!("{:?} -> {:?} at {:?}", self.last_contact, contact, self.body.pos);
            self.last_contact = contact;
        }
        &self.body
    }

    /// Drive up to `frames` frames spaced `frame_ms` apart, stopping early
    /// once `token` is cancelled. Returns the number of frames run.
    pub fn run_frames(&mut self, frames: usize, frame_ms: f64, token: &CancelToken) -> usize {
        let start = self.clock.last_time.unwrap_or(0.0);
        let mut ran = 0;
        while ran < frames && !token.is_cancelled() {
            ran += 1;
            self.frame(start + ran as f64 * frame_ms);
        }
        ran
    }

    /// Rebuild the obstacle set from `source`
    pub fn refresh_obstacles(&mut self, source: &mut dyn ObstacleSource) {
        self.registry.refresh(source);
    }

    /// Viewport changed: adopt the new size, put the body on the new floor
    /// and resample obstacles
    pub fn resize(&mut self, viewport: Viewport, source: &mut dyn ObstacleSource) {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;

        let size = self.tuning.body_size();
        self.body.pos.x = self.body.pos.x.clamp(0.0, viewport.max_x(size.x));
        self.body.pos.y = viewport.floor_y(size.y);
        self.body.vel.y = 0.0;
        self.body.supported = true;
        self.last_contact = self.body.contact();

        self.refresh_obstacles(source);
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        self.input.key_down(key, &mut self.body)
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        self.input.key_up(key, &mut self.body)
    }

    /// Window lost focus: held keys will never see their key-up
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        self.registry.current()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn pose(&self) -> SpritePose {
        SpritePose::from_body(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rect, StaticObstacles};
    use glam::Vec2;

    fn mount(rects: Vec<Rect>) -> Simulation {
        Simulation::mount(
            Viewport::new(800.0, 600.0),
            &mut StaticObstacles(rects),
            &Settings::default(),
        )
    }

    #[test]
    fn test_mount_spawns_on_floor() {
        let sim = mount(Vec::new());
        assert_eq!(sim.body().pos, Vec2::new(50.0, 450.0));
        assert_eq!(sim.body().vel, Vec2::ZERO);
        assert!(sim.obstacles().is_empty());
    }

    #[test]
    fn test_frame_is_one_step_regardless_of_elapsed_time() {
        let mut a = mount(Vec::new()).with_body(Body::at(Vec2::new(100.0, 0.0)));
        let mut b = a.clone();

        a.frame(16.0);
        a.frame(32.0);
        // Same two frames, a second apart
        b.frame(1000.0);
        b.frame(2000.0);

        assert_eq!(a.body(), b.body());
        assert_eq!(b.clock().delta_ticks(), 1000.0 / 16.0);
    }

    #[test]
    fn test_cancel_stops_frames() {
        let mut sim = mount(Vec::new());
        let token = CancelToken::new();
        assert_eq!(sim.run_frames(10, 16.0, &token), 10);
        assert_eq!(sim.clock().frames(), 10);

        token.clone().cancel();
        assert_eq!(sim.run_frames(10, 16.0, &token), 0);
        assert_eq!(sim.clock().frames(), 10);
    }

    #[test]
    fn test_resize_resamples_obstacles() {
        let mut sim = mount(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(sim.obstacles().len(), 1);

        sim.resize(Viewport::new(400.0, 300.0), &mut StaticObstacles(Vec::new()));
        assert!(sim.obstacles().is_empty());
        assert_eq!(sim.viewport(), Viewport::new(400.0, 300.0));

        sim.tick();
        assert_eq!(sim.body().pos.y, 150.0);
    }

    #[test]
    fn test_resize_moves_body_to_new_floor() {
        let mut sim = mount(Vec::new());
        assert_eq!(sim.body().pos.y, 450.0);

        // Taller window: no falling back down to the floor
        sim.resize(Viewport::new(800.0, 900.0), &mut StaticObstacles(Vec::new()));
        assert_eq!(sim.body().pos.y, 750.0);
        assert_eq!(sim.body().vel.y, 0.0);
        assert!(sim.body().supported);

        let before = *sim.body();
        sim.tick();
        assert_eq!(sim.body().pos, before.pos);

        // Narrower window pulls the body back inside
        let mut sim = mount(Vec::new()).with_body(Body::at(Vec2::new(600.0, 100.0)));
        sim.resize(Viewport::new(300.0, 400.0), &mut StaticObstacles(Vec::new()));
        assert_eq!(sim.body().pos, Vec2::new(200.0, 250.0));
    }

    #[test]
    fn test_clock_measures_elapsed_ticks() {
        let mut clock = FrameClock::new();
        clock.record(100.0);
        assert_eq!(clock.delta_ticks(), 1.0);
        clock.record(148.0);
        assert_eq!(clock.delta_ticks(), 3.0);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_keys_reach_body() {
        let mut sim = mount(Vec::new());
        assert!(sim.key_down(Key::Right));
        sim.tick();
        assert_eq!(sim.body().pos.x, 55.0);
        assert_eq!(sim.pose().left, 55.0);
        assert!(sim.pose().mirrored);

        sim.blur();
        assert!(sim.key_down(Key::Right));
    }
}
