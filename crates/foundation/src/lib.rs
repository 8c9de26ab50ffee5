//! Shared primitives: f64 math, easing and damping, colors, a generational
//! arena and scene time.

pub mod arena;
pub mod color;
pub mod handles;
pub mod math;
pub mod time;

pub use arena::*;
pub use color::*;
pub use handles::*;
pub use time::*;
