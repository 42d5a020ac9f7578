// Host-side tests for the debounced audio-reactive toggle.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod reactive {
    include!("../src/core/reactive.rs");
}

use reactive::*;

#[test]
fn starts_solid_with_exactly_one_form_visible() {
    let t = DisplayToggle::new(DEBOUNCE_WINDOW_MS);
    assert!(t.applied().solid_visible());
    assert!(!t.applied().wireframe_visible());
}

#[test]
fn missing_audio_sample_is_a_noop() {
    let mut t = DisplayToggle::new(DEBOUNCE_WINDOW_MS);
    let mut now = 0.0;
    for _ in 0..100 {
        assert_eq!(t.evaluate(None, now), None);
        assert!(t.applied().solid_visible());
        now += 16.0;
    }
}

#[test]
fn transient_spike_shorter_than_window_does_not_flip() {
    let mut t = DisplayToggle::new(DEBOUNCE_WINDOW_MS);
    // one loud frame, quiet again before the window elapses
    t.evaluate(Some(200), 0.0);
    assert!(t.applied().solid_visible());
    t.evaluate(Some(10), 16.0);
    t.evaluate(Some(10), 33.0);
    t.evaluate(Some(10), 50.0);
    assert!(t.applied().solid_visible());
}

#[test]
fn sustained_signal_flips_after_the_window() {
    let mut t = DisplayToggle::new(DEBOUNCE_WINDOW_MS);
    assert_eq!(t.evaluate(Some(200), 0.0), None);
    assert_eq!(t.evaluate(Some(210), 16.0), None);
    assert_eq!(t.evaluate(Some(220), 32.0), Some(TextDisplay::Wireframe));
    assert!(t.applied().wireframe_visible());
    assert!(!t.applied().solid_visible());
}

#[test]
fn repeated_requests_coalesce_without_extending_the_deadline() {
    let mut t = DisplayToggle::new(30.0);
    t.request(TextDisplay::Wireframe, 0.0);
    t.request(TextDisplay::Wireframe, 29.0);
    assert_eq!(t.poll(29.0), None);
    assert_eq!(t.poll(31.0), Some(TextDisplay::Wireframe));
}

#[test]
fn reverting_request_disarms_a_pending_flip() {
    let mut t = DisplayToggle::new(30.0);
    t.request(TextDisplay::Wireframe, 0.0);
    t.request(TextDisplay::Solid, 10.0);
    assert_eq!(t.poll(100.0), None);
    assert!(t.applied().solid_visible());
}

#[test]
fn threshold_boundary_requests_wireframe() {
    let mut t = DisplayToggle::new(0.0);
    assert_eq!(
        t.evaluate(Some(REACTIVE_THRESHOLD), 0.0),
        Some(TextDisplay::Wireframe)
    );
    assert_eq!(
        t.evaluate(Some(REACTIVE_THRESHOLD - 1), 1.0),
        Some(TextDisplay::Solid)
    );
}

#[test]
fn exactly_one_form_visible_throughout_noisy_input() {
    let mut t = DisplayToggle::new(DEBOUNCE_WINDOW_MS);
    let mut now = 0.0;
    for i in 0..1000u32 {
        let amp = ((i * 37) % 256) as u8;
        t.evaluate(Some(amp), now);
        let d = t.applied();
        assert!(d.solid_visible() ^ d.wireframe_visible());
        now += 16.0;
    }
}
