//! Backend-neutral render layer: camera matrices, draw-command collection
//! with pass ordering, GPU-ready uniform and vertex layouts, and the WGSL
//! sources the host compiles into pipelines.

pub mod camera;
pub mod mesh_cache;
pub mod renderer;
pub mod shaders;
pub mod uniforms;

pub use camera::Camera3D;
pub use mesh_cache::{MeshCache, MeshKey, Vertex};
pub use renderer::{RenderCommand, RenderFrame, Renderer};
pub use shaders::ShaderKind;
pub use uniforms::{DrawUniforms, FrameUniforms};
