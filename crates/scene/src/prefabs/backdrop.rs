use foundation::Rgb;
use foundation::math::Vec3;
use procedural::Material;
use procedural::stars::{STAR_COUNT, STAR_EXTENT, STAR_SPIN};

use crate::SceneGraph;
use crate::components::{Drawable, MaterialKind, MeshKind, PassState, Transform};
use crate::entity::NodeId;

pub const SUN_POSITION: Vec3 = Vec3 {
    x: -5.0,
    y: 0.0,
    z: -1.5,
};
const SUN_CORE_RADIUS: f64 = 0.5;
const SUN_CORONA_RADIUS: f64 = 0.58;
const SUN_HALO_RADIUS: f64 = 0.65;
const SUN_GLOW_RADIUS: f64 = 0.9;

/// Layered sun: an emissive core inside three additive shells.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunNodes {
    pub group: NodeId,
    pub core: NodeId,
    pub corona: NodeId,
    pub halo: NodeId,
    pub glow: NodeId,
}

fn shell(graph: &mut SceneGraph, parent: NodeId, radius: f64, segments: u32, color: Rgb, opacity: f64) -> NodeId {
    graph.spawn_drawable(
        Some(parent),
        Transform::identity().with_uniform_scale(radius),
        Drawable::new(
            Drawable::sphere(segments),
            MaterialKind::Basic { color, opacity },
            PassState::ADDITIVE,
        ),
    )
}

pub fn spawn_sun(graph: &mut SceneGraph) -> SunNodes {
    let group = graph.spawn(None, Transform::translate(SUN_POSITION));
    let core = graph.spawn_drawable(
        Some(group),
        Transform::identity().with_uniform_scale(SUN_CORE_RADIUS),
        Drawable::new(
            Drawable::sphere(32),
            MaterialKind::Lit {
                color: Rgb::from_rgb8(0xff, 0xdc, 0xa8),
                emissive: Rgb::from_rgb8(0xff, 0x9f, 0x1a).scale(2.0),
                material: Material {
                    roughness: 0.85,
                    metalness: 0.0,
                },
            },
            PassState::OPAQUE,
        ),
    );
    let corona = shell(graph, group, SUN_CORONA_RADIUS, 32, Rgb::from_rgb8(0xff, 0xcc, 0x6e), 0.15);
    let halo = shell(graph, group, SUN_HALO_RADIUS, 24, Rgb::from_rgb8(0xff, 0xdc, 0xa8), 0.22);
    let glow = shell(graph, group, SUN_GLOW_RADIUS, 24, Rgb::from_rgb8(0xfb, 0xbf, 0x24), 0.08);

    SunNodes {
        group,
        core,
        corona,
        halo,
        glow,
    }
}

impl SunNodes {
    pub fn update(&self, graph: &mut SceneGraph, dt_s: f64, time_s: f64) {
        if let Some(t) = graph.transform_mut(self.core) {
            t.rotation.y += dt_s * 0.1;
        }
        if let Some(t) = graph.transform_mut(self.corona) {
            t.rotation.y -= dt_s * 0.03;
            t.rotation.z += dt_s * 0.02;
        }
        if let Some(t) = graph.transform_mut(self.halo) {
            t.scale = Vec3::splat(SUN_HALO_RADIUS * (1.0 + (time_s * 1.5).sin() * 0.01));
        }
    }
}

pub fn spawn_starfield(graph: &mut SceneGraph) -> NodeId {
    graph.spawn_drawable(
        None,
        Transform::identity(),
        Drawable::new(
            MeshKind::Starfield {
                count: STAR_COUNT,
                extent: STAR_EXTENT,
            },
            MaterialKind::Basic {
                color: Rgb::from_rgb8(0xc7, 0xd2, 0xfe),
                opacity: 0.85,
            },
            PassState::TRANSPARENT,
        ),
    )
}

/// Slow background spin about Y.
pub fn rotate_starfield(graph: &mut SceneGraph, stars: NodeId, dt_s: f64) {
    if let Some(t) = graph.transform_mut(stars) {
        t.rotation.y += dt_s * STAR_SPIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_layers_spin_and_pulse() {
        let mut graph = SceneGraph::new();
        let sun = spawn_sun(&mut graph);
        sun.update(&mut graph, 1.0, 1.0);

        assert!((graph.transform(sun.core).unwrap().rotation.y - 0.1).abs() < 1e-12);
        let corona = graph.transform(sun.corona).unwrap();
        assert!(corona.rotation.y < 0.0 && corona.rotation.z > 0.0);
        let halo = graph.transform(sun.halo).unwrap().scale.x;
        assert!((halo / SUN_HALO_RADIUS - 1.0).abs() <= 0.01);

        let center = graph.world_matrix(sun.glow).unwrap().translation();
        assert_eq!(center, SUN_POSITION);
    }

    #[test]
    fn starfield_rotates_slowly() {
        let mut graph = SceneGraph::new();
        let stars = spawn_starfield(&mut graph);
        for _ in 0..60 {
            rotate_starfield(&mut graph, stars, 1.0 / 60.0);
        }
        let y = graph.transform(stars).unwrap().rotation.y;
        assert!((y - STAR_SPIN).abs() < 1e-9);
    }
}
