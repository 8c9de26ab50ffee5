use bytemuck::Zeroable;
use foundation::Rgb;
use foundation::math::Vec3;
use procedural::SceneLights;
use procedural::surface::rim_boost;
use scene::components::MaterialKind;

use crate::camera::Camera3D;
use crate::renderer::RenderCommand;

fn rgba(c: Rgb, a: f64) -> [f32; 4] {
    let [r, g, b] = c.to_f32();
    [r, g, b, a as f32]
}

fn dir4(v: Vec3, w: f64) -> [f32; 4] {
    let [x, y, z] = v.to_f32();
    [x, y, z, w as f32]
}

/// Per-frame globals; layout matches `FrameUniforms` in the WGSL prelude.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub key_dir: [f32; 4],
    pub key_color: [f32; 4],
    pub fill_dir: [f32; 4],
    pub fill_color: [f32; 4],
    pub ambient: [f32; 4],
    pub hemi_sky: [f32; 4],
    pub hemi_ground: [f32; 4],
    pub params: [f32; 4],
}

impl FrameUniforms {
    pub fn new(camera: &Camera3D, lights: &SceneLights, time_s: f64, width: u32, height: u32) -> Self {
        Self {
            view_proj: camera.view_proj().to_f32(),
            camera_pos: dir4(camera.position, time_s),
            key_dir: dir4(lights.key.direction, lights.key.intensity),
            key_color: rgba(lights.key.color, 1.0),
            fill_dir: dir4(lights.fill.direction, lights.fill.intensity),
            fill_color: rgba(lights.fill.color, lights.wrap),
            ambient: rgba(lights.ambient_color, lights.ambient_intensity),
            hemi_sky: rgba(lights.hemisphere.sky, lights.hemisphere.intensity),
            hemi_ground: rgba(lights.hemisphere.ground, 0.0),
            params: [lights.fill_weight as f32, width as f32, height as f32, 0.0],
        }
    }
}

/// Per-draw block; layout matches `DrawUniforms` in the WGSL prelude.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    pub surface: [f32; 4],
    pub extra: [f32; 4],
}

impl DrawUniforms {
    pub fn from_command(cmd: &RenderCommand) -> Self {
        let mut out = Self {
            model: cmd.model.to_f32(),
            ..Self::zeroed()
        };
        match cmd.drawable.material {
            MaterialKind::Surface {
                world,
                ramp,
                params,
                material,
            } => {
                out.color = rgba(ramp.base, 1.0);
                out.emissive = [0.0, 0.0, 0.0, world.world_type() as f32];
                out.surface = [
                    params.noise_scale as f32,
                    params.displacement as f32,
                    material.roughness as f32,
                    material.metalness as f32,
                ];
                out.extra[0] = rim_boost(world) as f32;
            }
            MaterialKind::Clouds { color } | MaterialKind::Ring { color } => {
                out.color = rgba(color, 1.0);
            }
            MaterialKind::Atmosphere { color, intensity } => {
                out.color = rgba(color, intensity);
            }
            MaterialKind::Lit {
                color,
                emissive,
                material,
            } => {
                out.color = rgba(color, 1.0);
                out.emissive = rgba(emissive, 0.0);
                out.surface[2] = material.roughness as f32;
                out.surface[3] = material.metalness as f32;
            }
            MaterialKind::Basic { color, opacity } => {
                out.color = rgba(color, opacity);
            }
        }
        out
    }
}

/// Byte stride between per-draw blocks in one dynamic-offset buffer.
pub fn draw_stride(min_alignment: u32) -> u64 {
    let size = std::mem::size_of::<DrawUniforms>() as u64;
    let align = u64::from(min_alignment.max(1));
    size.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Renderer;
    use content::WorldId;
    use scene::{SceneConfig, SolarSystem};

    #[test]
    fn layouts_are_vec4_aligned() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 208);
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 128);
        assert_eq!(draw_stride(256), 256);
        assert_eq!(draw_stride(64), 128);
    }

    #[test]
    fn surface_command_packs_world_profile() {
        let system = SolarSystem::new(SceneConfig::default()).unwrap();
        let cam = Camera3D::from_pose(system.camera_pose(), 800, 600);
        let frame = Renderer::collect(system.graph(), &cam);
        let skills = system.content().world(WorldId::Skills);

        let packed: Vec<DrawUniforms> = frame
            .commands
            .iter()
            .filter(|c| {
                matches!(c.drawable.material, MaterialKind::Surface { world, .. } if world == WorldId::Skills)
            })
            .map(DrawUniforms::from_command)
            .collect();
        assert_eq!(packed.len(), 1);
        let u = packed[0];
        assert_eq!(u.emissive[3], 1.0);
        assert_eq!(u.surface[0], skills.profile.noise_scale as f32);
        assert_eq!(u.surface[1], skills.profile.displacement as f32);
        assert!(u.extra[0] > 0.0);
        assert_eq!(u.color[3], 1.0);
    }

    #[test]
    fn frame_uniforms_carry_time_and_lights() {
        let cam = Camera3D::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            1.0,
            0.1,
            100.0,
        );
        let lights = SceneLights::default();
        let u = FrameUniforms::new(&cam, &lights, 12.5, 640, 480);
        assert_eq!(u.camera_pos, [0.0, 0.0, 5.0, 12.5]);
        assert_eq!(u.key_dir[3], 1.8);
        assert_eq!(u.ambient[3], 0.25);
        assert_eq!(u.hemi_sky[3], 0.35);
        assert_eq!(u.ambient[0], (0xcb as f64 / 255.0) as f32);
        assert_eq!(u.hemi_ground[2], (0x2a as f64 / 255.0) as f32);
        assert_eq!([u.params[1], u.params[2]], [640.0, 480.0]);
    }
}
