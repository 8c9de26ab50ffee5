//! World-specific decorations, dispatched over the closed [`WorldId`] set.

use std::f64::consts::FRAC_PI_2;

use content::{World, WorldId};
use foundation::Rgb;
use foundation::math::Vec3;
use procedural::Material;
use procedural::ring::{
    ACCENT_RADIUS, RING_INNER_RADIUS, RING_OUTER_RADIUS, RING_RADIAL_SEGMENTS, RING_THETA_SEGMENTS,
};

use crate::SceneGraph;
use crate::components::{CullMode, Drawable, MaterialKind, MeshKind, PassState, Transform};
use crate::entity::NodeId;

pub const RING_BASE_ROTATION: Vec3 = Vec3 {
    x: -1.25,
    y: 0.15,
    z: 0.0,
};
const RING_WOBBLE_RATE: f64 = 0.12;
const RING_WOBBLE_AMPLITUDE: f64 = 0.03;

pub const MOON_RADIUS: f64 = 0.15;
pub const MOON_ORBIT_RADIUS: f64 = 1.45;
const MOON_ANGULAR_RATE: f64 = 0.3;
const MOON_TINT: Rgb = Rgb::from_rgb8(0x94, 0xa3, 0xb8);

const ORBIT_PATH_RADIUS: f64 = 1.7;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WorldFeature {
    /// Banded ring with a thin accent torus in its gap.
    Rings {
        group: NodeId,
        ring: NodeId,
        accent: NodeId,
    },
    /// A small moon on an inclined orbit plus a faint path marker.
    CompanionMoon { path: NodeId, moon: NodeId },
    /// A faint flat orbit path with nothing on it.
    OrbitPath { path: NodeId },
}

/// Flat torus in the parent's XZ plane.
fn path_torus(graph: &mut SceneGraph, parent: NodeId, radius: f64, tube: f64, color: Rgb, opacity: f64) -> NodeId {
    graph.spawn_drawable(
        Some(parent),
        Transform::rotate(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
        Drawable::new(
            MeshKind::Torus {
                radius,
                tube,
                radial_segments: 8,
                tubular_segments: 128,
            },
            MaterialKind::Basic { color, opacity },
            PassState::TRANSPARENT.with_cull(CullMode::None),
        ),
    )
}

impl WorldFeature {
    /// Spawns the decoration for `world` under `parent` (the planet's tilt node).
    pub fn spawn(graph: &mut SceneGraph, parent: NodeId, world: &World) -> Self {
        match world.id {
            WorldId::Projects => {
                let group = graph.spawn(Some(parent), Transform::rotate(RING_BASE_ROTATION));
                let ring = graph.spawn_drawable(
                    Some(group),
                    Transform::identity(),
                    Drawable::new(
                        MeshKind::PolarRing {
                            inner_radius: RING_INNER_RADIUS,
                            outer_radius: RING_OUTER_RADIUS,
                            theta_segments: RING_THETA_SEGMENTS,
                            radial_segments: RING_RADIAL_SEGMENTS,
                        },
                        MaterialKind::Ring { color: world.color },
                        PassState::TRANSPARENT.with_cull(CullMode::None),
                    ),
                );
                let accent = path_torus(graph, group, ACCENT_RADIUS, 0.003, world.color, 0.12);
                WorldFeature::Rings {
                    group,
                    ring,
                    accent,
                }
            }
            WorldId::Personal => {
                let path = path_torus(graph, parent, MOON_ORBIT_RADIUS, 0.004, world.color, 0.1);
                let moon = graph.spawn_drawable(
                    Some(parent),
                    Transform::translate(Vec3::new(MOON_ORBIT_RADIUS, 0.0, 0.0))
                        .with_uniform_scale(MOON_RADIUS),
                    Drawable::new(
                        Drawable::sphere(24),
                        MaterialKind::Lit {
                            color: world.color.lerp(MOON_TINT, 0.5),
                            emissive: Rgb::BLACK,
                            material: Material {
                                roughness: 0.9,
                                metalness: 0.0,
                            },
                        },
                        PassState::OPAQUE,
                    ),
                );
                WorldFeature::CompanionMoon { path, moon }
            }
            WorldId::Skills | WorldId::Experience => WorldFeature::OrbitPath {
                path: path_torus(graph, parent, ORBIT_PATH_RADIUS, 0.003, world.color, 0.08),
            },
        }
    }

    pub fn update(&self, graph: &mut SceneGraph, time_s: f64) {
        match *self {
            WorldFeature::Rings { group, .. } => {
                if let Some(t) = graph.transform_mut(group) {
                    t.rotation.z = RING_BASE_ROTATION.z
                        + (time_s * RING_WOBBLE_RATE).sin() * RING_WOBBLE_AMPLITUDE;
                }
            }
            WorldFeature::CompanionMoon { moon, .. } => {
                if let Some(t) = graph.transform_mut(moon) {
                    t.translation = moon_offset(time_s);
                }
            }
            WorldFeature::OrbitPath { .. } => {}
        }
    }
}

/// Moon position relative to its planet at scene time `time_s`.
pub fn moon_offset(time_s: f64) -> Vec3 {
    let t = time_s * MOON_ANGULAR_RATE;
    Vec3::new(
        t.cos() * MOON_ORBIT_RADIUS,
        (t * 0.7).sin() * 0.25,
        t.sin() * MOON_ORBIT_RADIUS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use content::PortfolioContent;

    fn spawn_for(id: WorldId) -> (SceneGraph, WorldFeature) {
        let content = PortfolioContent::load_embedded().unwrap();
        let mut graph = SceneGraph::new();
        let root = graph.spawn(None, Transform::identity());
        let feature = WorldFeature::spawn(&mut graph, root, content.world(id));
        (graph, feature)
    }

    #[test]
    fn each_world_gets_its_own_decoration() {
        assert!(matches!(spawn_for(WorldId::Projects).1, WorldFeature::Rings { .. }));
        assert!(matches!(spawn_for(WorldId::Personal).1, WorldFeature::CompanionMoon { .. }));
        assert!(matches!(spawn_for(WorldId::Skills).1, WorldFeature::OrbitPath { .. }));
        assert!(matches!(spawn_for(WorldId::Experience).1, WorldFeature::OrbitPath { .. }));
    }

    #[test]
    fn moon_stays_near_its_orbit() {
        let (mut graph, feature) = spawn_for(WorldId::Personal);
        let WorldFeature::CompanionMoon { moon, .. } = feature else {
            panic!("expected a moon");
        };
        for step in 0..50 {
            let t = step as f64 * 0.7;
            feature.update(&mut graph, t);
            let p = graph.transform(moon).unwrap().translation;
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!((planar - MOON_ORBIT_RADIUS).abs() < 1e-9);
            assert!(p.y.abs() <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn ring_wobble_is_small_and_centered_on_base() {
        let (mut graph, feature) = spawn_for(WorldId::Projects);
        let WorldFeature::Rings { group, .. } = feature else {
            panic!("expected rings");
        };
        for step in 0..100 {
            feature.update(&mut graph, step as f64);
            let r = graph.transform(group).unwrap().rotation;
            assert_eq!(r.x, RING_BASE_ROTATION.x);
            assert!(r.z.abs() <= RING_WOBBLE_AMPLITUDE);
        }
    }
}
