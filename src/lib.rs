mod utils;

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod pointer;
pub mod renderer;

use animation::Animation;
use config::FieldConfig;
use error::Error;
use field::Field;
use log::{error, info, log_enabled, warn, Level, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{CanvasRenderer, Surface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use utils::{ConsoleLogger, Timer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

type CanvasAnimation = Animation<CanvasRenderer, StdRng>;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    ConsoleLogger::install(LevelFilter::Info);
}

fn parse_config(config_json: Option<String>) -> Result<FieldConfig, Error> {
    match config_json {
        Some(json) => FieldConfig::from_json(&json),
        None => Ok(FieldConfig::default()),
    }
}

fn seeded_rng(config: &FieldConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn window_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

fn request_animation_frame(window: &Window, callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

// Renders one frame, logs draw failures without killing the loop
fn run_frame(animation: &RefCell<CanvasAnimation>) -> bool {
    let _timer = if log_enabled!(Level::Debug) {
        Some(Timer::new("network-canvas frame"))
    } else {
        None
    };
    let result = animation.borrow_mut().tick();
    match result {
        Ok(keep_going) => keep_going,
        Err(err) => {
            error!("frame failed: {}", err);
            animation.borrow().is_running()
        }
    }
}

struct Listener {
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

fn listen<F>(window: &Window, event: &'static str, handler: F) -> Result<Listener, JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(Listener { event, closure })
}

fn mouse_position(event: &Event) -> Option<(f64, f64)> {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| (mouse.client_x() as f64, mouse.client_y() as f64))
}

/// A running background animation on a page canvas, wired to the window's
/// mouse and resize events. Dropping the handle stops it.
#[wasm_bindgen]
pub struct AnimationHandle {
    window: Window,
    animation: Rc<RefCell<CanvasAnimation>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl AnimationHandle {
    pub fn stop(&mut self) {
        self.animation.borrow_mut().stop();
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        for listener in self.listeners.drain(..) {
            if let Err(err) = self.window.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            ) {
                warn!("failed to remove {} listener: {:?}", listener.event, err);
            }
        }
        // breaks the callback's reference to itself
        self.frame_callback.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.animation.borrow().is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.animation.borrow().field.len()
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sizes the canvas to the window, populates the field and runs it on
/// `requestAnimationFrame` until the returned handle is stopped.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> Result<AnimationHandle, JsValue> {
    let window = web_sys::window().ok_or(Error::MissingGlobal("window"))?;
    let document = window.document().ok_or(Error::MissingGlobal("document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| Error::CanvasNotFound(canvas_id.to_owned()))?;

    let config = parse_config(config_json)?;
    let (width, height) = window_size(&window)?;
    let mut renderer = CanvasRenderer::new(canvas)?;
    renderer.resize(width, height);
    let rng = seeded_rng(&config);
    let field = Field::new(width, height, config, rng);
    let animation = Rc::new(RefCell::new(Animation::new(field, renderer)));

    // The handle owns every listener as soon as it is registered, so an early
    // return below drops it and Drop detaches whatever was attached.
    let mut handle = AnimationHandle {
        window: window.clone(),
        animation: animation.clone(),
        frame_id: Rc::new(Cell::new(None)),
        frame_callback: Rc::new(RefCell::new(None)),
        listeners: Vec::with_capacity(4),
    };
    {
        let animation = animation.clone();
        handle.listeners.push(listen(&window, "mousemove", move |event| {
            if let Some((x, y)) = mouse_position(&event) {
                animation.borrow_mut().pointer_move(x, y);
            }
        })?);
    }
    {
        let animation = animation.clone();
        handle.listeners.push(listen(&window, "mouseout", move |_| {
            animation.borrow_mut().pointer_leave();
        })?);
    }
    {
        let animation = animation.clone();
        handle.listeners.push(listen(&window, "click", move |event| {
            if let Some((x, y)) = mouse_position(&event) {
                animation.borrow_mut().click(x, y);
            }
        })?);
    }
    {
        let animation = animation.clone();
        let size_source = window.clone();
        handle.listeners.push(listen(&window, "resize", move |_| {
            match window_size(&size_source) {
                Ok((width, height)) => animation.borrow_mut().resize(width, height),
                Err(err) => warn!("could not read window size: {:?}", err),
            }
        })?);
    }

    {
        let animation = animation.clone();
        let frame_id = handle.frame_id.clone();
        let next = handle.frame_callback.clone();
        let window = window.clone();
        *handle.frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_id.set(None);
            if !run_frame(&animation) {
                return;
            }
            if let Some(callback) = next.borrow().as_ref() {
                match request_animation_frame(&window, callback) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(err) => error!("requestAnimationFrame failed: {:?}", err),
                }
            }
        }) as Box<dyn FnMut()>));
    }
    let first_frame = handle
        .frame_callback
        .borrow()
        .as_ref()
        .map(|callback| request_animation_frame(&window, callback));
    if let Some(id) = first_frame.transpose()? {
        handle.frame_id.set(Some(id));
    }

    info!(
        "network canvas started on #{} ({} particles)",
        canvas_id,
        animation.borrow().field.len()
    );
    Ok(handle)
}

/// A field on a canvas that the host drives itself: no listeners, no
/// animation frames, every event and frame comes through these methods.
#[wasm_bindgen]
pub struct NetworkCanvas {
    animation: CanvasAnimation,
}

#[wasm_bindgen]
impl NetworkCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<NetworkCanvas, JsValue> {
        let config = parse_config(config_json)?;
        let renderer = CanvasRenderer::new(canvas)?;
        let rng = seeded_rng(&config);
        let field = Field::new(renderer.width(), renderer.height(), config, rng);
        Ok(NetworkCanvas {
            animation: Animation::new(field, renderer),
        })
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.animation.resize(width, height);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.animation.pointer_move(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.animation.pointer_leave();
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.animation.click(x, y);
    }

    pub fn render_frame(&mut self) -> Result<(), JsValue> {
        self.animation.tick()?;
        Ok(())
    }

    pub fn particle_count(&self) -> usize {
        self.animation.field.len()
    }
}
