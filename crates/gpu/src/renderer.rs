use foundation::math::Mat4;
use foundation::math::precision::stable_total_cmp_f64;
use scene::SceneGraph;
use scene::components::{Drawable, MaterialKind, MeshKind};
use scene::entity::NodeId;

use crate::camera::Camera3D;
use crate::shaders::ShaderKind;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderCommand {
    pub node: NodeId,
    pub model: Mat4,
    pub drawable: Drawable,
    pub shader: ShaderKind,
    /// Eye distance used for back-to-front ordering.
    pub depth: f64,
}

#[derive(Debug, Default)]
pub struct RenderFrame {
    pub commands: Vec<RenderCommand>,
}

impl RenderFrame {
    pub fn opaque(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands
            .iter()
            .filter(|c| !c.drawable.pass.is_transparent())
    }

    pub fn transparent(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands
            .iter()
            .filter(|c| c.drawable.pass.is_transparent())
    }
}

/// Nothing left to blend once opacity or intensity reaches zero.
fn is_faded_out(drawable: &Drawable) -> bool {
    match drawable.material {
        MaterialKind::Basic { opacity, .. } => opacity <= 0.0,
        MaterialKind::Atmosphere { intensity, .. } => intensity <= 0.0,
        _ => false,
    }
}

pub struct Renderer;

impl Renderer {
    /// Draw list for one frame.
    ///
    /// Ordering contract:
    /// - Opaque commands come first, in scene-graph order.
    /// - Transparent commands follow, farthest first; the starfield counts as
    ///   infinitely far. Equal depths keep scene-graph order.
    pub fn collect(graph: &SceneGraph, camera: &Camera3D) -> RenderFrame {
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();

        for (node, model, drawable) in graph.drawables() {
            if is_faded_out(&drawable) {
                continue;
            }
            let depth = match drawable.mesh {
                MeshKind::Starfield { .. } => f64::INFINITY,
                _ => model.translation().distance(camera.position),
            };
            let cmd = RenderCommand {
                node,
                model,
                drawable,
                shader: ShaderKind::for_drawable(&drawable),
                depth,
            };
            if drawable.pass.is_transparent() {
                transparent.push(cmd);
            } else {
                opaque.push(cmd);
            }
        }

        transparent.sort_by(|a, b| {
            stable_total_cmp_f64(b.depth, a.depth).then_with(|| a.node.cmp(&b.node))
        });

        opaque.extend(transparent);
        RenderFrame { commands: opaque }
    }
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use crate::camera::Camera3D;
    use crate::shaders::ShaderKind;
    use foundation::Rgb;
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;
    use scene::components::{Drawable, MaterialKind, MeshKind, PassState, Transform};
    use scene::prefabs::SELECTION_RING_RADIUS;
    use scene::{SceneConfig, SceneGraph, SolarSystem};

    fn camera() -> Camera3D {
        Camera3D::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, 0.1, 200.0)
    }

    fn basic(opacity: f64, pass: PassState) -> Drawable {
        Drawable::new(
            Drawable::sphere(4),
            MaterialKind::Basic {
                color: Rgb::WHITE,
                opacity,
            },
            pass,
        )
    }

    #[test]
    fn opaque_first_then_transparent_back_to_front() {
        let mut graph = SceneGraph::new();
        let near = graph.spawn_drawable(
            None,
            Transform::translate(Vec3::new(0.0, 0.0, 5.0)),
            basic(0.5, PassState::TRANSPARENT),
        );
        let solid = graph.spawn_drawable(None, Transform::identity(), basic(1.0, PassState::OPAQUE));
        let far = graph.spawn_drawable(
            None,
            Transform::translate(Vec3::new(0.0, 0.0, -5.0)),
            basic(0.5, PassState::ADDITIVE),
        );

        let frame = Renderer::collect(&graph, &camera());
        let order: Vec<_> = frame.commands.iter().map(|c| c.node).collect();
        assert_eq!(order, vec![solid, far, near]);
        assert_eq!(frame.opaque().count(), 1);
        assert_eq!(frame.transparent().count(), 2);
    }

    #[test]
    fn faded_and_hidden_drawables_are_skipped() {
        let mut graph = SceneGraph::new();
        graph.spawn_drawable(None, Transform::identity(), basic(0.0, PassState::TRANSPARENT));
        let hidden = graph.spawn_drawable(None, Transform::identity(), basic(1.0, PassState::OPAQUE));
        graph.set_visible(hidden, false);
        assert!(Renderer::collect(&graph, &camera()).commands.is_empty());
    }

    #[test]
    fn solar_system_draws_stars_behind_every_transparent_layer() {
        let system = SolarSystem::new(SceneConfig::default()).unwrap();
        let cam = Camera3D::from_pose(system.camera_pose(), 1280, 720);
        let frame = Renderer::collect(system.graph(), &cam);

        let first_transparent = frame.transparent().next().unwrap();
        assert_eq!(first_transparent.shader, ShaderKind::Stars);
        assert_eq!(
            frame
                .commands
                .iter()
                .filter(|c| c.shader == ShaderKind::Surface)
                .count(),
            4
        );
        // Selection rings start fully faded.
        assert!(!frame.commands.iter().any(|c| matches!(
            c.drawable.mesh,
            MeshKind::Torus { radius, .. } if radius == SELECTION_RING_RADIUS
        )));
    }
}
