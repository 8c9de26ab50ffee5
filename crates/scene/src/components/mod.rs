pub mod drawable;
pub mod transform;

pub use drawable::*;
pub use transform::*;
