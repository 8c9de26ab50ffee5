use content::WorldId;
use foundation::Rgb;
use procedural::Material;
use procedural::surface::{ColorRamp, SurfaceParams};

/// Procedural geometry a drawable is built from. The renderer generates and
/// caches one mesh per distinct value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MeshKind {
    Sphere {
        lat_segments: u32,
        lon_segments: u32,
    },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
    PolarRing {
        inner_radius: f64,
        outer_radius: f64,
        theta_segments: u32,
        radial_segments: u32,
    },
    /// Point cloud of `count` stars placed by hash inside an `extent` cube.
    Starfield { count: u32, extent: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MaterialKind {
    /// Displaced, noise-colored planet surface.
    Surface {
        world: WorldId,
        ramp: ColorRamp,
        params: SurfaceParams,
        material: Material,
    },
    Clouds { color: Rgb },
    Atmosphere { color: Rgb, intensity: f64 },
    Ring { color: Rgb },
    /// Scene-lit body with optional emission (sun core, moon).
    Lit {
        color: Rgb,
        emissive: Rgb,
        material: Material,
    },
    /// Unlit flat color.
    Basic { color: Rgb, opacity: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Opaque,
    Alpha,
    Additive,
}

/// Which faces are discarded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CullMode {
    None,
    Back,
    Front,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PassState {
    pub blend: BlendMode,
    pub depth_test: bool,
    pub depth_write: bool,
    pub cull: CullMode,
}

impl PassState {
    pub const OPAQUE: PassState = PassState {
        blend: BlendMode::Opaque,
        depth_test: true,
        depth_write: true,
        cull: CullMode::Back,
    };

    /// Transparent overlay: tested against depth, never written.
    pub const TRANSPARENT: PassState = PassState {
        blend: BlendMode::Alpha,
        depth_test: true,
        depth_write: false,
        cull: CullMode::Back,
    };

    pub const ADDITIVE: PassState = PassState {
        blend: BlendMode::Additive,
        depth_test: true,
        depth_write: false,
        cull: CullMode::Back,
    };

    pub fn with_cull(mut self, cull: CullMode) -> Self {
        self.cull = cull;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.blend != BlendMode::Opaque
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable {
    pub mesh: MeshKind,
    pub material: MaterialKind,
    pub pass: PassState,
}

impl Drawable {
    pub fn new(mesh: MeshKind, material: MaterialKind, pass: PassState) -> Self {
        Self {
            mesh,
            material,
            pass,
        }
    }

    pub fn sphere(segments: u32) -> MeshKind {
        MeshKind::Sphere {
            lat_segments: segments,
            lon_segments: segments,
        }
    }

    /// Opacity or intensity knob animated per frame, if the material has one.
    pub fn set_fade(&mut self, value: f64) {
        match &mut self.material {
            MaterialKind::Basic { opacity, .. } => *opacity = value,
            MaterialKind::Atmosphere { intensity, .. } => *intensity = value,
            _ => {}
        }
    }
}
