use glam::Vec3;
use rand::prelude::*;

// Field tuning. Depth wraps inside [STAR_DEPTH_MIN, STAR_DEPTH_MAX]; a star
// crossing the far bound restarts at the near bound with zero velocity.
pub const STAR_COUNT: usize = 600;
pub const STAR_DEPTH_MIN: f32 = -1500.0;
pub const STAR_DEPTH_MAX: f32 = 1500.0;
pub const STAR_SPREAD_XY: f32 = 1200.0;

// Per-tick forward acceleration: a fixed base plus uniform jitter in
// [0, STAR_ACCEL_JITTER).
pub const STAR_ACCEL_BASE: f32 = 0.015;
pub const STAR_ACCEL_JITTER: f32 = 0.03;

// Whole-field roll applied every tick, independent of per-star state.
pub const FIELD_ROLL_PER_TICK: f32 = 0.0008;

pub const STAR_SIZE_MIN: f32 = 1.0;
pub const STAR_SIZE_MAX: f32 = 3.5;

#[derive(Clone, Debug)]
pub struct Star {
    pub position: Vec3,
    pub velocity: f32,
    pub size: f32,
}

/// Seeded point-cloud simulation. Owns its stars; nothing else aliases them.
pub struct Starfield {
    pub stars: Vec<Star>,
    roll: f32,
    rng: StdRng,
}

impl Starfield {
    /// Scatter `count` stars across the field. The same seed reproduces the
    /// same field and the same jitter sequence on every tick.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| Star {
                position: Vec3::new(
                    rng.gen_range(-STAR_SPREAD_XY..STAR_SPREAD_XY),
                    rng.gen_range(-STAR_SPREAD_XY..STAR_SPREAD_XY),
                    rng.gen_range(STAR_DEPTH_MIN..STAR_DEPTH_MAX),
                ),
                velocity: 0.0,
                size: rng.gen_range(STAR_SIZE_MIN..STAR_SIZE_MAX),
            })
            .collect();
        Self {
            stars,
            roll: 0.0,
            rng,
        }
    }

    /// Advance every star one tick and apply the field roll drift.
    pub fn tick(&mut self) {
        for star in &mut self.stars {
            star.velocity += STAR_ACCEL_BASE + self.rng.gen::<f32>() * STAR_ACCEL_JITTER;
            star.position.z += star.velocity;
            if star.position.z > STAR_DEPTH_MAX {
                star.position.z = STAR_DEPTH_MIN;
                star.velocity = 0.0;
            }
        }
        self.roll = (self.roll + FIELD_ROLL_PER_TICK) % std::f32::consts::TAU;
    }

    /// Accumulated roll of the whole field, in radians.
    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Star position with the field roll applied, in world space.
    pub fn world_position(&self, star: &Star) -> Vec3 {
        let (sin_r, cos_r) = self.roll.sin_cos();
        Vec3::new(
            star.position.x * cos_r - star.position.y * sin_r,
            star.position.x * sin_r + star.position.y * cos_r,
            star.position.z,
        )
    }
}
