use crate::core::OrbitCamera;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub pointer: Rc<RefCell<PointerState>>,
}

/// Drag to orbit, wheel to zoom. Distance stays inside the orbit bounds.
pub fn wire_orbit_handlers(w: OrbitWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut p = w.pointer.borrow_mut();
        p.down = true;
        p.x = ev.client_x() as f32;
        p.y = ev.client_y() as f32;
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &OrbitWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut p = w.pointer.borrow_mut();
        if !p.down {
            return;
        }
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        let dx = x - p.x;
        let dy = y - p.y;
        p.x = x;
        p.y = y;
        drop(p);
        w.orbit.borrow_mut().rotate(dx, dy);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &OrbitWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.pointer.borrow_mut().down = false;
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &OrbitWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.orbit.borrow_mut().zoom(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
