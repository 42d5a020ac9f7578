// Host-side tests for the starfield simulation.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod starfield {
    include!("../src/core/starfield.rs");
}

use starfield::*;

#[test]
fn depth_stays_bounded_over_many_ticks() {
    let mut field = Starfield::new(128, 7);
    for tick in 0..5000 {
        field.tick();
        for (i, star) in field.stars.iter().enumerate() {
            assert!(
                star.position.z >= STAR_DEPTH_MIN && star.position.z <= STAR_DEPTH_MAX,
                "star {} out of bounds at tick {}: z = {}",
                i,
                tick,
                star.position.z
            );
        }
    }
}

#[test]
fn crossing_far_bound_resets_depth_and_velocity_same_tick() {
    let mut field = Starfield::new(4, 1);
    field.stars[0].position.z = STAR_DEPTH_MAX - 0.001;
    field.stars[0].velocity = 10.0;
    field.tick();
    assert_eq!(field.stars[0].position.z, STAR_DEPTH_MIN);
    assert_eq!(field.stars[0].velocity, 0.0);
}

#[test]
fn velocity_accumulates_between_wraparounds() {
    let mut field = Starfield::new(1, 3);
    field.stars[0].position.z = STAR_DEPTH_MIN;
    field.stars[0].velocity = 0.0;
    let mut prev = 0.0;
    for _ in 0..100 {
        field.tick();
        assert!(field.stars[0].velocity > prev);
        prev = field.stars[0].velocity;
    }
}

#[test]
fn field_roll_advances_by_constant_per_tick() {
    let mut field = Starfield::new(8, 9);
    assert_eq!(field.roll(), 0.0);
    field.tick();
    assert!((field.roll() - FIELD_ROLL_PER_TICK).abs() < 1e-7);
    field.tick();
    assert!((field.roll() - 2.0 * FIELD_ROLL_PER_TICK).abs() < 1e-7);
}

#[test]
fn same_seed_replays_identically() {
    let mut a = Starfield::new(64, 1234);
    let mut b = Starfield::new(64, 1234);
    for _ in 0..500 {
        a.tick();
        b.tick();
    }
    for (sa, sb) in a.stars.iter().zip(&b.stars) {
        assert_eq!(sa.position, sb.position);
        assert_eq!(sa.velocity, sb.velocity);
    }
}

#[test]
fn world_position_rotates_about_the_depth_axis() {
    let mut field = Starfield::new(1, 5);
    for _ in 0..200 {
        field.tick();
    }
    field.stars[0].position = glam::Vec3::new(100.0, 0.0, 40.0);
    let w = field.world_position(&field.stars[0]);
    let r = field.roll();
    assert!((w.x - 100.0 * r.cos()).abs() < 1e-3);
    assert!((w.y - 100.0 * r.sin()).abs() < 1e-3);
    assert_eq!(w.z, 40.0);
}

#[test]
fn initial_field_is_inside_bounds() {
    let field = Starfield::new(256, 11);
    for star in &field.stars {
        assert!(star.position.z >= STAR_DEPTH_MIN && star.position.z <= STAR_DEPTH_MAX);
        assert!(star.position.x.abs() <= STAR_SPREAD_XY);
        assert!(star.position.y.abs() <= STAR_SPREAD_XY);
        assert_eq!(star.velocity, 0.0);
        assert!(star.size >= STAR_SIZE_MIN && star.size <= STAR_SIZE_MAX);
    }
}
