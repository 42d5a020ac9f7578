/// Scene palette, lighting and post-processing tuning.
///
/// Grouped here so the scene reads as data; the simulation constants live
/// next to their modules under `core/`.
// Scene background (0x020202)
pub const BACKGROUND_COLOR: [f64; 3] = [0.008, 0.008, 0.008];

// Text material (Pantone Classic Blue, 0x0f4c81) and its wireframe twin
pub const TEXT_COLOR: [f32; 3] = [0.059, 0.298, 0.506];
pub const WIREFRAME_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const TEXT_POSITION: [f32; 3] = [-150.0, -90.0, 0.0];

// Glow disc, also the god-rays light source (0xffccaa)
pub const DISC_COLOR: [f32; 3] = [1.0, 0.8, 0.667];
pub const DISC_CENTER: [f32; 3] = [0.0, 200.0, -1000.0];
pub const DISC_RADIUS: f32 = 300.0;
// HDR boost so the disc clears the bright-pass threshold
pub const DISC_EMISSIVE: f32 = 2.0;

// Lights for the text mesh; the key sits at the disc, the fill behind the
// camera, both warm (0xffccaa)
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.8, 0.667];
pub const KEY_LIGHT_POS: [f32; 3] = [0.0, 200.0, -1000.0];
pub const KEY_LIGHT_INTENSITY: f32 = 2.0;
pub const FILL_LIGHT_POS: [f32; 3] = [0.0, 200.0, 3000.0];
pub const FILL_LIGHT_INTENSITY: f32 = 0.6;
pub const AMBIENT_LEVEL: f32 = 0.25;

// God-rays march, applied at half resolution
pub const GODRAYS_DENSITY: f32 = 0.8;
pub const GODRAYS_DECAY: f32 = 0.95;
pub const GODRAYS_WEIGHT: f32 = 0.6;
pub const GODRAYS_EXPOSURE: f32 = 0.3;
pub const BRIGHT_THRESHOLD: f32 = 0.6;

// Starfield replay seed
pub const STARFIELD_SEED: u64 = 42;

// Audio
pub const AUDIO_URL: &str = "assets/ambient.ogg";
pub const AUDIO_GAIN: f32 = 0.8;
pub const ANALYSER_FFT_SIZE: u32 = 256;

// DOM ids owned by the overlay
pub const SOUND_OVERLAY_ID: &str = "sound-overlay";
pub const SOUND_PROGRESS_ID: &str = "sound-progress";
pub const MOTION_BUTTON_ID: &str = "motion-enable";
