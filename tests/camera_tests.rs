// Host-side tests for orbit camera math and the device-orientation mapping.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod camera {
    include!("../src/core/camera.rs");
}

use camera::*;
use glam::{Quat, Vec3};

#[test]
fn resize_updates_aspect_ratio() {
    let mut cam = OrbitCamera::from_eye(Vec3::from(CAMERA_EYE), Vec3::ZERO, 800.0 / 600.0);
    cam.set_viewport(1024.0, 768.0);
    assert!((cam.aspect - 1024.0 / 768.0).abs() < 1e-6);
}

#[test]
fn zero_height_viewport_does_not_divide_by_zero() {
    let mut cam = OrbitCamera::from_eye(Vec3::from(CAMERA_EYE), Vec3::ZERO, 1.0);
    cam.set_viewport(800.0, 0.0);
    assert!(cam.aspect.is_finite());
}

#[test]
fn from_eye_reproduces_the_eye_position() {
    let eye = Vec3::from(CAMERA_EYE);
    let cam = OrbitCamera::from_eye(eye, Vec3::ZERO, 1.5);
    assert!((cam.eye() - eye).length() < 0.5);
}

#[test]
fn zoom_clamps_to_orbit_bounds() {
    let mut cam = OrbitCamera::from_eye(Vec3::from(CAMERA_EYE), Vec3::ZERO, 1.5);
    cam.zoom(1.0e6);
    assert_eq!(cam.distance, ORBIT_MAX_DISTANCE);
    cam.zoom(-1.0e7);
    assert_eq!(cam.distance, ORBIT_MIN_DISTANCE);
}

#[test]
fn pitch_clamps_off_the_poles() {
    let mut cam = OrbitCamera::from_eye(Vec3::from(CAMERA_EYE), Vec3::ZERO, 1.5);
    cam.rotate(0.0, 1.0e5);
    assert!(cam.pitch <= ORBIT_PITCH_LIMIT);
    cam.rotate(0.0, -1.0e6);
    assert!(cam.pitch >= -ORBIT_PITCH_LIMIT);
}

#[test]
fn view_projection_is_finite() {
    let cam = OrbitCamera::from_eye(Vec3::from(CAMERA_EYE), Vec3::ZERO, 1024.0 / 768.0);
    let vp = cam.projection_matrix() * cam.view_matrix();
    for v in vp.to_cols_array() {
        assert!(v.is_finite());
    }
}

#[test]
fn upright_device_looks_down_negative_z() {
    let q = orientation_quat(0.0, std::f32::consts::FRAC_PI_2, 0.0, 0.0);
    let fwd = q * Vec3::NEG_Z;
    assert!((fwd - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn alpha_turns_the_view_left() {
    let q = orientation_quat(
        std::f32::consts::FRAC_PI_2,
        std::f32::consts::FRAC_PI_2,
        0.0,
        0.0,
    );
    let fwd = q * Vec3::NEG_Z;
    assert!((fwd - Vec3::NEG_X).length() < 1e-4);
}

#[test]
fn oriented_view_moves_the_eye_to_the_origin() {
    let eye = Vec3::new(1.0, 2.0, 3.0);
    let view = oriented_view_matrix(eye, Quat::IDENTITY);
    assert!(view.transform_point3(eye).length() < 1e-5);
}
