//! Sleuth Runner entry point
//!
//! Handles platform-specific initialization and starts the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;

    use sleuth_runner::Settings;
    use sleuth_runner::platform::web::{self, MountedView};

    thread_local! {
        static VIEW: RefCell<Option<MountedView>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
        }

        log::info!("Sleuth Runner starting...");

        match web::mount(Settings::load()) {
            Ok(view) => VIEW.with(|v| *v.borrow_mut() = Some(view)),
            Err(e) => log::error!("Mount failed: {:?}", e),
        }
    }

    pub fn stop() {
        if let Some(view) = VIEW.with(|v| v.borrow_mut().take()) {
            view.unmount();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

/// Tear the view down (called by the host page on navigation)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_app::stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sleuth Runner (native) starting...");
    log::info!("Native mode runs a headless scene - serve the wasm build for the page version");

    headless_scene();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drop the body onto a ledge, walk it off and let it settle on the floor
#[cfg(not(target_arch = "wasm32"))]
fn headless_scene() {
    use glam::Vec2;
    use sleuth_runner::consts::FRAME_MS;
    use sleuth_runner::sim::{Body, Rect, StaticObstacles, Viewport};
    use sleuth_runner::{CancelToken, Key, Settings, Simulation};

    let viewport = Viewport::new(800.0, 600.0);
    let mut cards = StaticObstacles(vec![Rect::new(300.0, 500.0, 200.0, 20.0)]);
    let mut sim = Simulation::mount(viewport, &mut cards, &Settings::load())
        .with_body(Body::at(Vec2::new(300.0, 0.0)));
    let token = CancelToken::new();

    sim.run_frames(60, FRAME_MS, &token);
    log::info!("Landed: {:?} contact={:?}", sim.body().pos, sim.body().contact());

    for _ in 0..12 {
        sim.key_down(Key::Right);
        sim.run_frames(10, FRAME_MS, &token);
        sim.key_up(Key::Right);
    }
    sim.run_frames(120, FRAME_MS, &token);

    let body = sim.body();
    log::info!(
        "Settled: {:?} facing={:?} contact={:?} after {} frames",
        body.pos,
        body.facing,
        body.contact(),
        sim.clock().frames()
    );
    println!("{}", serde_json::to_string(body).unwrap_or_default());
}
