pub mod backdrop;
pub mod planet;

pub use backdrop::*;
pub use planet::*;
