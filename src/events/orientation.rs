//! Device-orientation camera control, represented as a tagged variant so a
//! missing capability never needs a null check at the use sites.

use crate::core::orientation_quat;
use glam::Quat;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Default)]
struct SensorAngles {
    alpha: f32,
    beta: f32,
    gamma: f32,
    fresh: bool,
}

/// Owns the sensor listener. `connect` acquires it, `disconnect` removes it
/// from the window and drops the closure.
pub struct SensorRig {
    window: web::Window,
    angles: Rc<Cell<SensorAngles>>,
    listener: Option<Closure<dyn FnMut(web::DeviceOrientationEvent)>>,
    latched: Cell<Option<Quat>>,
}

impl SensorRig {
    fn new(window: web::Window) -> Self {
        Self {
            window,
            angles: Rc::new(Cell::new(SensorAngles::default())),
            listener: None,
            latched: Cell::new(None),
        }
    }

    pub fn connect(&mut self) {
        if self.listener.is_some() {
            return;
        }
        let angles = self.angles.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
            angles.set(SensorAngles {
                alpha: ev.alpha().unwrap_or(0.0) as f32,
                beta: ev.beta().unwrap_or(0.0) as f32,
                gamma: ev.gamma().unwrap_or(0.0) as f32,
                fresh: true,
            });
        }) as Box<dyn FnMut(_)>);
        if self
            .window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref())
            .is_ok()
        {
            self.listener = Some(closure);
        }
    }

    pub fn disconnect(&mut self) {
        if let Some(closure) = self.listener.take() {
            _ = self.window.remove_event_listener_with_callback(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
            );
        }
        self.latched.set(None);
        self.angles.set(SensorAngles::default());
    }

    pub fn is_connected(&self) -> bool {
        self.listener.is_some()
    }

    /// Camera quaternion from the last sensor reading; `None` until the
    /// first event arrives.
    pub fn latch(&self) -> Option<Quat> {
        let a = self.angles.get();
        if !a.fresh {
            return self.latched.get();
        }
        let screen = screen_angle(&self.window);
        let q = orientation_quat(
            a.alpha.to_radians(),
            a.beta.to_radians(),
            a.gamma.to_radians(),
            screen.to_radians(),
        );
        self.latched.set(Some(q));
        Some(q)
    }
}

pub enum OrientationControl {
    NoOrientation,
    Sensor(SensorRig),
}

impl OrientationControl {
    /// Selected once at startup: touch-capable devices get a rig (initially
    /// disconnected), everything else the inert variant.
    pub fn detect(window: &web::Window) -> Self {
        if window.navigator().max_touch_points() > 0 {
            OrientationControl::Sensor(SensorRig::new(window.clone()))
        } else {
            OrientationControl::NoOrientation
        }
    }

    pub fn is_sensor(&self) -> bool {
        matches!(self, OrientationControl::Sensor(_))
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, OrientationControl::Sensor(rig) if rig.is_connected())
    }

    pub fn connect(&mut self) {
        if let OrientationControl::Sensor(rig) = self {
            rig.connect();
        }
    }

    pub fn disconnect(&mut self) {
        if let OrientationControl::Sensor(rig) = self {
            rig.disconnect();
        }
    }

    pub fn latch(&self) -> Option<Quat> {
        match self {
            OrientationControl::Sensor(rig) if rig.is_connected() => rig.latch(),
            _ => None,
        }
    }
}

fn screen_angle(window: &web::Window) -> f32 {
    window
        .screen()
        .ok()
        .and_then(|s| s.orientation().angle().ok())
        .map(|a| a as f32)
        .unwrap_or(0.0)
}
