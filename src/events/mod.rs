pub mod orientation;
pub mod pointer;

pub use orientation::OrientationControl;
pub use pointer::{wire_orbit_handlers, OrbitWiring, PointerState};
