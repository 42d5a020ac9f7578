// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod reactive {
    include!("../src/core/reactive.rs");
}
mod starfield {
    include!("../src/core/starfield.rs");
}

use camera::*;
use constants::*;
use reactive::*;
use starfield::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn starfield_constants_are_consistent() {
    assert!(STAR_COUNT > 0);
    assert!(STAR_DEPTH_MIN < STAR_DEPTH_MAX);
    assert!(STAR_SPREAD_XY > 0.0);
    assert!(STAR_ACCEL_BASE > 0.0);
    assert!(STAR_ACCEL_JITTER >= 0.0);
    assert!(FIELD_ROLL_PER_TICK > 0.0);
    assert!(STAR_SIZE_MIN < STAR_SIZE_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn reactive_bin_fits_the_analyser_output() {
    // the analyser exposes fft_size / 2 frequency bins
    assert!(REACTIVE_BIN < (ANALYSER_FFT_SIZE / 2) as usize);
    assert!(DEBOUNCE_WINDOW_MS > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_constants_are_consistent() {
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(ORBIT_MIN_DISTANCE < ORBIT_MAX_DISTANCE);
    assert!(ORBIT_PITCH_LIMIT < std::f32::consts::FRAC_PI_2);

    // the initial eye sits inside the orbit distance bounds
    let eye = glam::Vec3::from(CAMERA_EYE);
    assert!(eye.length() >= ORBIT_MIN_DISTANCE);
    assert!(eye.length() <= ORBIT_MAX_DISTANCE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scene_depth_covers_the_starfield() {
    // the far plane must contain the whole depth range from any orbit
    assert!(CAMERA_FAR > ORBIT_MAX_DISTANCE + STAR_DEPTH_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn post_constants_are_within_reasonable_bounds() {
    assert!(GODRAYS_DECAY > 0.0 && GODRAYS_DECAY <= 1.0);
    assert!(GODRAYS_DENSITY > 0.0 && GODRAYS_DENSITY <= 1.0);
    assert!(GODRAYS_WEIGHT > 0.0);
    assert!(GODRAYS_EXPOSURE > 0.0);
    assert!((0.0..=1.0).contains(&BRIGHT_THRESHOLD));
    // the disc must out-shine the bright threshold to seed the shafts
    assert!(DISC_EMISSIVE > BRIGHT_THRESHOLD);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn palette_values_are_normalized() {
    for c in TEXT_COLOR
        .iter()
        .chain(WIREFRAME_COLOR.iter())
        .chain(DISC_COLOR.iter())
        .chain(LIGHT_COLOR.iter())
    {
        assert!((0.0..=1.0).contains(c));
    }
    for c in BACKGROUND_COLOR.iter() {
        assert!((0.0..=1.0).contains(c));
    }
    assert!((0.0..=1.0).contains(&AUDIO_GAIN));
}
