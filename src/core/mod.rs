pub mod camera;
pub mod glyph;
pub mod reactive;
pub mod starfield;

pub use camera::*;
pub use glyph::*;
pub use reactive::*;
pub use starfield::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
