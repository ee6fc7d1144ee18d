// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use network_canvas::{initialize, start, NetworkCanvas};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(id: &str, width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn manual_canvas_populates_from_its_size() {
    let mut network = NetworkCanvas::new(canvas("manual", 1400, 800), None).unwrap();
    assert_eq!(network.particle_count(), 93);
    network.render_frame().unwrap();
    network.click(100.0, 100.0);
    assert_eq!(network.particle_count(), 101);
    network.pointer_move(120.0, 80.0);
    network.render_frame().unwrap();
    network.pointer_leave();
    network.resize(600.0, 400.0);
    assert_eq!(network.particle_count(), 20);
    network.render_frame().unwrap();
}

#[wasm_bindgen_test]
fn manual_canvas_rejects_bad_config() {
    let result = NetworkCanvas::new(
        canvas("bad-config", 100, 100),
        Some(r#"{"density": -5}"#.to_owned()),
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn start_fails_without_canvas() {
    assert!(start("no-such-canvas", None).is_err());
}

#[wasm_bindgen_test]
fn started_animation_stops() {
    initialize();
    canvas("background", 10, 10);
    let mut handle = start("background", Some(r#"{"seed": 3}"#.to_owned())).unwrap();
    assert!(handle.is_running());
    handle.stop();
    assert!(!handle.is_running());
    // stopping twice is harmless
    handle.stop();
}

#[wasm_bindgen_test]
fn stopped_handle_detaches_window_listeners() {
    canvas("detach", 10, 10);
    let window = web_sys::window().unwrap();
    let click = || MouseEvent::new("click").unwrap();
    let mut handle = start(
        "detach",
        Some(r#"{"seed": 5, "max_particles": 100000}"#.to_owned()),
    )
    .unwrap();

    let before = handle.particle_count();
    window.dispatch_event(&click()).unwrap();
    assert_eq!(handle.particle_count(), before + 8);

    handle.stop();
    window.dispatch_event(&click()).unwrap();
    assert_eq!(handle.particle_count(), before + 8);
}
