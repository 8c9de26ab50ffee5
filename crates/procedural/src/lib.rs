//! Pure numeric rendering pipeline: noise fields, surface displacement and
//! coloring, lighting, ring/atmosphere/cloud shading and mesh generation.
//!
//! The WGSL shaders in the `gpu` crate mirror these functions; tests here are
//! the reference for golden-image comparisons.

pub mod atmosphere;
pub mod clouds;
pub mod lighting;
pub mod mesh;
pub mod noise;
pub mod ring;
pub mod stars;
pub mod surface;

pub use lighting::{DirectionalLight, HemisphereLight, Material, SceneLights};
pub use mesh::MeshData;

use foundation::Rgb;

/// Shaded output of a fragment evaluation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fragment {
    pub color: Rgb,
    pub alpha: f64,
}
