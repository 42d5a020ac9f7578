use crate::audio::AudioFeed;
use crate::core::{
    oriented_view_matrix, DisplayToggle, OrbitCamera, Starfield, TextGeometry, CAMERA_EYE,
    REACTIVE_BIN, STAR_SIZE_MAX, STAR_SIZE_MIN,
};
use crate::events::OrientationControl;
use crate::render::{GpuState, StarInstance};
use glam::{Quat, Vec3};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one tick touches. Owned by the driver's closure; nothing here
/// is reachable from outside the animation loop except through the shared
/// `Rc` handles.
pub struct FrameContext {
    pub starfield: Starfield,
    pub toggle: DisplayToggle,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub orientation: Rc<RefCell<OrientationControl>>,
    pub audio: Rc<RefCell<AudioFeed>>,
    pub gpu: Option<GpuState<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub last_instant: Instant,
    pub clock_ms: f64,
    pub oriented: Option<Quat>,
}

impl FrameContext {
    /// Tick step (a): latch the sensor quaternion when the control is live.
    pub fn update_orientation(&mut self) {
        self.oriented = self.orientation.borrow().latch();
    }

    /// Tick steps (c)–(e): sample audio, advance the starfield, render.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.clock_ms += dt.as_secs_f64() * 1000.0;

        // audio sampling + debounced toggle; a no-op until audio is loaded
        let bin = self.audio.borrow_mut().sample_bin(REACTIVE_BIN);
        self.toggle.evaluate(bin, self.clock_ms);

        self.starfield.tick();

        let (proj, view) = {
            let orbit = self.orbit.borrow();
            let proj = orbit.projection_matrix();
            let view = match self.oriented {
                Some(q) => oriented_view_matrix(Vec3::from(CAMERA_EYE), q),
                None => orbit.view_matrix(),
            };
            (proj, view)
        };

        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            let instances = star_instances(&self.starfield);
            if let Err(e) = gpu.render(&instances, self.toggle.applied(), proj, view) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

fn star_instances(field: &Starfield) -> Vec<StarInstance> {
    field
        .stars
        .iter()
        .map(|s| StarInstance {
            pos: field.world_position(s).to_array(),
            size: s.size,
            brightness: 0.6 + 0.4 * (s.size - STAR_SIZE_MIN) / (STAR_SIZE_MAX - STAR_SIZE_MIN),
        })
        .collect()
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    star_capacity: usize,
    text: &TextGeometry,
) -> Option<GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas, star_capacity, text).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// requestAnimationFrame loop with an owned cancellation handle. `start` is
/// idempotent while a tick is scheduled; `stop` cancels the pending tick so
/// nothing mutates until the next `start`.
#[derive(Clone)]
pub struct AnimationDriver {
    frame_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationDriver {
    pub fn new(ctx: Rc<RefCell<FrameContext>>) -> Self {
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_for_schedule = tick.clone();
        let id_for_tick = frame_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            id_for_tick.set(None);
            let mut c = ctx.borrow_mut();
            c.update_orientation();
            // reschedule before the frame body so a slow frame cannot starve
            // the loop
            if let Some(w) = web::window() {
                if let Ok(id) = w.request_animation_frame(
                    tick_for_schedule
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    id_for_tick.set(Some(id));
                }
            }
            c.frame();
        }) as Box<dyn FnMut()>));
        Self { frame_id, tick }
    }

    pub fn start(&self) {
        if self.frame_id.get().is_some() {
            return;
        }
        if let Some(w) = web::window() {
            if let Ok(id) = w.request_animation_frame(
                self.tick.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            ) {
                self.frame_id.set(Some(id));
            }
        }
    }

    pub fn stop(&self) {
        if let Some(id) = self.frame_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame_id.get().is_some()
    }
}
