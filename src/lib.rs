#![cfg(target_arch = "wasm32")]
use crate::constants::{MOTION_BUTTON_ID, STARFIELD_SEED};
use crate::core::{
    extrude_glyph, DisplayToggle, OrbitCamera, Starfield, CAMERA_EYE, DEBOUNCE_WINDOW_MS,
    GLYPH_HAO, STAR_COUNT, TEXT_DEPTH, TEXT_SIZE,
};
use crate::events::{wire_orbit_handlers, OrbitWiring, OrientationControl, PointerState};
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hao-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // mount: create the render surface and attach it
    let canvas = dom::create_canvas(&document)?;
    dom::attach_to_body(&document, canvas.as_ref())?;
    dom::sync_canvas_backing_size(&canvas);

    // scene state, owned here and moved into the frame context
    let starfield = Starfield::new(STAR_COUNT, STARFIELD_SEED);
    let text = extrude_glyph(&GLYPH_HAO, TEXT_SIZE, TEXT_DEPTH);
    log::info!(
        "[text] {} vertices, {} wire segments",
        text.vertices.len(),
        text.edge_indices.len() / 2
    );

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let orbit = Rc::new(RefCell::new(OrbitCamera::from_eye(
        Vec3::from(CAMERA_EYE),
        Vec3::ZERO,
        aspect,
    )));
    let orientation = Rc::new(RefCell::new(OrientationControl::detect(&window)));
    let touch = orientation.borrow().is_sensor();

    overlay::ensure_sound_prompt(&document);
    if touch {
        overlay::ensure_motion_button(&document);
    }

    let audio_feed = Rc::new(RefCell::new(audio::AudioFeed::empty()));
    let gpu = frame::init_gpu(&canvas, STAR_COUNT, &text).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        starfield,
        toggle: DisplayToggle::new(DEBOUNCE_WINDOW_MS),
        orbit: orbit.clone(),
        orientation: orientation.clone(),
        audio: audio_feed.clone(),
        gpu,
        canvas: canvas.clone(),
        last_instant: Instant::now(),
        clock_ms: 0.0,
        oriented: None,
    }));
    let driver = frame::AnimationDriver::new(frame_ctx);

    wire_viewport_resize(&window, &canvas, orbit.clone());
    wire_orbit_handlers(OrbitWiring {
        canvas: canvas.clone(),
        orbit: orbit.clone(),
        pointer: Rc::new(RefCell::new(PointerState::default())),
    });
    wire_first_gesture_audio(&document, audio_feed);

    // On touch devices the loop waits for the motion opt-in; everywhere
    // else it starts with the mount.
    if touch {
        wire_motion_toggle(&document, orientation.clone(), driver.clone());
    } else {
        driver.start();
    }

    wire_visibility(&document, orientation.clone(), driver.clone());
    wire_unmount(&window, canvas.clone(), orientation, driver);

    Ok(())
}

fn wire_viewport_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    orbit: Rc<RefCell<OrbitCamera>>,
) {
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas);
        orbit
            .borrow_mut()
            .set_viewport(canvas.width() as f32, canvas.height() as f32);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_first_gesture_audio(document: &web::Document, feed: Rc<RefCell<audio::AudioFeed>>) {
    static AUDIO_REQUESTED: AtomicBool = AtomicBool::new(false);
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if AUDIO_REQUESTED.swap(true, Ordering::SeqCst) {
            return;
        }
        log::info!("[gesture] loading audio after first interaction");
        audio::begin_load(feed.clone(), doc.clone());
    }) as Box<dyn FnMut()>);
    _ = document.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_motion_toggle(
    document: &web::Document,
    orientation: Rc<RefCell<OrientationControl>>,
    driver: frame::AnimationDriver,
) {
    let doc = document.clone();
    dom::add_click_listener(document, MOTION_BUTTON_ID, move || {
        let mut control = orientation.borrow_mut();
        if control.is_connected() {
            control.disconnect();
            driver.stop();
            overlay::set_motion_label(&doc, "enable motion control");
        } else {
            control.connect();
            driver.start();
            overlay::set_motion_label(&doc, "disable motion control");
        }
    });
}

fn wire_visibility(
    document: &web::Document,
    orientation: Rc<RefCell<OrientationControl>>,
    driver: frame::AnimationDriver,
) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if doc.hidden() {
            driver.stop();
        } else {
            let control = orientation.borrow();
            if !control.is_sensor() || control.is_connected() {
                driver.start();
            }
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_unmount(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    orientation: Rc<RefCell<OrientationControl>>,
    driver: frame::AnimationDriver,
) {
    let closure = Closure::wrap(Box::new(move || {
        driver.stop();
        orientation.borrow_mut().disconnect();
        dom::detach(canvas.as_ref());
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}
