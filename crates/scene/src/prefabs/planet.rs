use std::f64::consts::FRAC_PI_2;

use content::{World, WorldId};
use foundation::math::Vec3;
use procedural::Material;
use procedural::atmosphere::SHELL_RADIUS;
use procedural::clouds::{CLOUD_SHELL_SCALE, cloud_color};
use procedural::surface::{ColorRamp, SurfaceParams};

use crate::SceneGraph;
use crate::components::{CullMode, Drawable, MaterialKind, MeshKind, PassState, Transform};
use crate::entity::NodeId;

pub const SELECTION_RING_RADIUS: f64 = 1.22;
pub const SELECTION_RING_TUBE: f64 = 0.005;

/// Nodes making up one planet.
///
/// `group` carries position and (hover-animated) scale, `tilt` the fixed
/// axial tilt; everything else hangs off `tilt`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlanetNodes {
    pub group: NodeId,
    pub tilt: NodeId,
    pub surface: NodeId,
    pub clouds: Option<NodeId>,
    pub atmosphere: NodeId,
    pub selection_ring: NodeId,
}

pub fn spawn_planet(graph: &mut SceneGraph, world: &World, idle_glow: f64) -> PlanetNodes {
    let group = graph.spawn(
        None,
        Transform::translate(world.position).with_uniform_scale(world.scale),
    );
    let tilt = graph.spawn(
        Some(group),
        Transform::rotate(Vec3::new(world.profile.tilt, 0.0, 0.0)),
    );

    let surface = graph.spawn_drawable(
        Some(tilt),
        Transform::identity(),
        Drawable::new(
            Drawable::sphere(64),
            MaterialKind::Surface {
                world: world.id,
                ramp: ColorRamp::from_base(world.color),
                params: SurfaceParams {
                    noise_scale: world.profile.noise_scale,
                    displacement: world.profile.displacement,
                },
                material: Material {
                    roughness: world.profile.roughness,
                    metalness: world.profile.metalness,
                },
            },
            PassState::OPAQUE,
        ),
    );

    let clouds = (world.id == WorldId::Personal).then(|| {
        graph.spawn_drawable(
            Some(tilt),
            Transform::identity().with_uniform_scale(CLOUD_SHELL_SCALE),
            Drawable::new(
                Drawable::sphere(48),
                MaterialKind::Clouds {
                    color: cloud_color(world.color),
                },
                PassState::TRANSPARENT,
            ),
        )
    });

    // Rendered from the inside so only the rim past the silhouette glows.
    let atmosphere = graph.spawn_drawable(
        Some(tilt),
        Transform::identity().with_uniform_scale(SHELL_RADIUS),
        Drawable::new(
            Drawable::sphere(48),
            MaterialKind::Atmosphere {
                color: world.color,
                intensity: idle_glow,
            },
            PassState::ADDITIVE.with_cull(CullMode::Front),
        ),
    );

    let selection_ring = graph.spawn_drawable(
        Some(tilt),
        Transform::rotate(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
        Drawable::new(
            MeshKind::Torus {
                radius: SELECTION_RING_RADIUS,
                tube: SELECTION_RING_TUBE,
                radial_segments: 16,
                tubular_segments: 128,
            },
            MaterialKind::Basic {
                color: world.color,
                opacity: 0.0,
            },
            PassState::TRANSPARENT.with_cull(CullMode::None),
        ),
    );

    PlanetNodes {
        group,
        tilt,
        surface,
        clouds,
        atmosphere,
        selection_ring,
    }
}

#[cfg(test)]
mod tests {
    use super::spawn_planet;
    use crate::SceneGraph;
    use crate::components::{BlendMode, CullMode, MaterialKind};
    use content::{PortfolioContent, WorldId};

    #[test]
    fn only_personal_world_gets_clouds() {
        let content = PortfolioContent::load_embedded().unwrap();
        let mut graph = SceneGraph::new();
        for world in content.worlds() {
            let nodes = spawn_planet(&mut graph, world, 0.4);
            assert_eq!(nodes.clouds.is_some(), world.id == WorldId::Personal);
        }
    }

    #[test]
    fn atmosphere_is_additive_back_faces_without_depth_write() {
        let content = PortfolioContent::load_embedded().unwrap();
        let mut graph = SceneGraph::new();
        let nodes = spawn_planet(&mut graph, content.world(WorldId::Skills), 0.4);

        let atmo = graph.drawable(nodes.atmosphere).unwrap();
        assert_eq!(atmo.pass.blend, BlendMode::Additive);
        assert_eq!(atmo.pass.cull, CullMode::Front);
        assert!(atmo.pass.depth_test && !atmo.pass.depth_write);
        assert!(matches!(atmo.material, MaterialKind::Atmosphere { intensity, .. } if intensity == 0.4));

        let world_pos = graph.world_matrix(nodes.surface).unwrap().translation();
        assert_eq!(world_pos, content.world(WorldId::Skills).position);
    }
}
