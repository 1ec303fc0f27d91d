//! Browser frontend
//!
//! Wires a [`Simulation`] to the page: obstacles are the bounding rects of
//! every element matching the configured selector, the viewport is the
//! window's inner size, and the body is drawn by moving the sprite element.
//!
//! All handlers run on the browser's single event loop and share the
//! simulation through `Rc<RefCell<_>>`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Window};

use crate::input::Key;
use crate::projection::SpritePose;
use crate::scheduler::{CancelToken, Simulation};
use crate::settings::Settings;
use crate::sim::{ObstacleSource, Rect, Viewport};

/// Samples obstacle rectangles from the live DOM
pub struct DomObstacles {
    document: Document,
    selector: String,
}

impl DomObstacles {
    pub fn new(document: Document, selector: String) -> Self {
        Self { document, selector }
    }
}

impl ObstacleSource for DomObstacles {
    fn sample(&mut self) -> Vec<Rect> {
        let nodes = match self.document.query_selector_all(&self.selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("Bad obstacle selector {:?}: {:?}", self.selector, e);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| {
                let r = el.get_bounding_client_rect();
                Rect::new(
                    r.left() as f32,
                    r.top() as f32,
                    r.width() as f32,
                    r.height() as f32,
                )
            })
            .collect()
    }
}

/// Window inner size; zero if the browser won't say
pub fn window_viewport(window: &Window) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(width as f32, height as f32)
}

fn dom_key(event: &web_sys::Event) -> Option<Key> {
    event
        .dyn_ref::<KeyboardEvent>()
        .and_then(|e| Key::from_dom(&e.key()))
}

fn apply_pose(sprite: &HtmlElement, pose: &SpritePose) {
    let style = sprite.style();
    let _ = style.set_property("left", &format!("{}px", pose.left));
    let _ = style.set_property("top", &format!("{}px", pose.top));
    let _ = style.set_property("transform", pose.flip_transform());

    if let Some(img) = sprite
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = img.style().set_property("transform", pose.tilt_transform());
    }
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// A running view. Dropping it (or calling [`MountedView::unmount`]) stops
/// the animation loop and removes every listener.
pub struct MountedView {
    window: Window,
    sim: Rc<RefCell<Simulation>>,
    token: CancelToken,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    listeners: Vec<(&'static str, Listener)>,
}

/// Mount the body onto the current page
pub fn mount(settings: Settings) -> Result<MountedView, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let sprite: HtmlElement = document
        .get_element_by_id(&settings.sprite_id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{} element", settings.sprite_id)))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("sprite is not an HTML element"))?;
    let style = sprite.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("pointer-events", "none");

    let obstacles = Rc::new(RefCell::new(DomObstacles::new(
        document,
        settings.obstacle_selector.clone(),
    )));
    let sim = Simulation::mount(
        window_viewport(&window),
        &mut *obstacles.borrow_mut(),
        &settings,
    );

    let mut view = MountedView {
        window: window.clone(),
        sim: Rc::new(RefCell::new(sim)),
        token: CancelToken::new(),
        frame_id: Rc::new(Cell::new(None)),
        frame_callback: Rc::new(RefCell::new(None)),
        listeners: Vec::new(),
    };

    // Layout changes move the cards; resample them
    {
        let sim = view.sim.clone();
        let window = window.clone();
        view.listen("resize", move |_event| {
            sim.borrow_mut()
                .resize(window_viewport(&window), &mut *obstacles.borrow_mut());
        });
    }

    {
        let sim = view.sim.clone();
        view.listen("keydown", move |event| {
            if let Some(key) = dom_key(&event) {
                sim.borrow_mut().key_down(key);
            }
        });
    }

    {
        let sim = view.sim.clone();
        view.listen("keyup", move |event| {
            if let Some(key) = dom_key(&event) {
                sim.borrow_mut().key_up(key);
            }
        });
    }

    {
        let sim = view.sim.clone();
        view.listen("blur", move |_event| {
            sim.borrow_mut().blur();
        });
    }

    view.start_loop(sprite);
    log::info!("Sleuth running");
    Ok(view)
}

impl MountedView {
    /// Stop the loop and detach from the page
    pub fn unmount(self) {}

    fn listen<F>(&mut self, kind: &'static str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Listener::new(handler);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("Could not listen for {}: {:?}", kind, e);
            return;
        }
        self.listeners.push((kind, closure));
    }

    fn start_loop(&mut self, sprite: HtmlElement) {
        let sim = self.sim.clone();
        let token = self.token.clone();
        let window = self.window.clone();
        let frame_id = self.frame_id.clone();
        let callback = self.frame_callback.clone();

        let on_frame = FrameCallback::new(move |time: f64| {
            if token.is_cancelled() {
                return;
            }
            let pose = {
                let mut sim = sim.borrow_mut();
                sim.frame(time);
                sim.pose()
            };
            apply_pose(&sprite, &pose);

            if let Some(cb) = callback.borrow().as_ref() {
                let func: &js_sys::Function = cb.as_ref().unchecked_ref();
                frame_id.set(window.request_animation_frame(func).ok());
            }
        });
        *self.frame_callback.borrow_mut() = Some(on_frame);

        if let Some(cb) = self.frame_callback.borrow().as_ref() {
            let func: &js_sys::Function = cb.as_ref().unchecked_ref();
            self.frame_id.set(self.window.request_animation_frame(func).ok());
        }
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();

        for (kind, closure) in self.listeners.drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        log::info!("Sleuth unmounted");
    }
}
