//! Scene and interaction core: an arena scene graph populated with planets,
//! their decorations and the backdrop, plus the selection, camera, hover and
//! loading state that [`SolarSystem`] advances once per frame.

pub mod atmosphere;
pub mod camera;
pub mod components;
pub mod entity;
pub mod features;
pub mod graph;
pub mod label;
pub mod loading;
pub mod picking;
pub mod planet;
pub mod prefabs;
pub mod selection;
pub mod system;

pub use atmosphere::{AtmosphereGlow, GlowConfig};
pub use camera::{CameraChoreographer, CameraPose, ChoreographyConfig};
pub use entity::NodeId;
pub use graph::SceneGraph;
pub use label::{LabelStyle, PlanetLabel};
pub use loading::{LoadingConfig, LoadingIndicator};
pub use picking::{PickHit, PickTarget, Ray, pick_world};
pub use planet::{Planet, PlanetConfig};
pub use selection::{SelectionEvent, SelectionMachine, SelectionState, SelectionTimings};
pub use system::{Input, SceneConfig, SceneError, SceneEvent, SolarSystem};
