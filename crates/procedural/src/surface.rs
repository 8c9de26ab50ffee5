use content::WorldId;
use foundation::Rgb;
use foundation::math::{Vec3, easing::smoothstep};

use crate::lighting::{Material, SceneLights, shade};
use crate::noise::snoise3;

/// Drift speed of the noise field along +Y (noise units per second).
pub const TIME_DRIFT: f64 = 0.02;
/// Half-width of the central difference used for the noise gradient.
pub const GRADIENT_EPS: f64 = 0.01;

const RAMP_FREQ: f64 = 0.35;
const RAMP_LOW: f64 = 0.38;
const RAMP_HIGH: f64 = 0.68;

/// Three-octave fractal sum: weights 0.5, 0.25, 0.125 at 1x, 2x, 4x.
pub fn fbm(p: Vec3) -> f64 {
    snoise3(p) * 0.5 + snoise3(p * 2.0) * 0.25 + snoise3(p * 4.0) * 0.125
}

/// Central-difference gradient of [`fbm`] at `p`.
pub fn fbm_gradient(p: Vec3) -> Vec3 {
    let e = GRADIENT_EPS;
    let dx = fbm(p + Vec3::new(e, 0.0, 0.0)) - fbm(p - Vec3::new(e, 0.0, 0.0));
    let dy = fbm(p + Vec3::new(0.0, e, 0.0)) - fbm(p - Vec3::new(0.0, e, 0.0));
    let dz = fbm(p + Vec3::new(0.0, 0.0, e)) - fbm(p - Vec3::new(0.0, 0.0, e));
    Vec3::new(dx, dy, dz) * (1.0 / (2.0 * e))
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceParams {
    pub noise_scale: f64,
    pub displacement: f64,
}

/// A displaced surface vertex in object space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Noise-space sample point, reused by the color ramp.
    pub sample: Vec3,
}

pub fn sample_position(position: Vec3, noise_scale: f64, time_s: f64) -> Vec3 {
    position * noise_scale + Vec3::new(0.0, time_s * TIME_DRIFT, 0.0)
}

/// Displaces `position` along `normal` and perturbs the normal with the
/// gradient of the same noise field, so lighting follows the visible relief.
pub fn displace(position: Vec3, normal: Vec3, params: &SurfaceParams, time_s: f64) -> SurfaceVertex {
    let sample = sample_position(position, params.noise_scale, time_s);
    let n = fbm(sample);
    let grad = fbm_gradient(sample);
    SurfaceVertex {
        position: position + normal * (n * params.displacement),
        normal: (normal - grad * (params.displacement * params.noise_scale)).normalize(),
        sample,
    }
}

/// Dark, base and light stops derived from one base color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorRamp {
    pub dark: Rgb,
    pub base: Rgb,
    pub light: Rgb,
}

impl ColorRamp {
    pub fn from_base(base: Rgb) -> Self {
        Self {
            dark: base.scale(0.3),
            base,
            light: base.lerp(Rgb::WHITE, 0.35),
        }
    }

    /// Piecewise-linear blend keyed on `n` in `[0, 1]`.
    pub fn eval(&self, n: f64) -> Rgb {
        if n < RAMP_LOW {
            self.dark.lerp(self.base, n / RAMP_LOW)
        } else if n < RAMP_HIGH {
            self.base
                .lerp(self.light, (n - RAMP_LOW) / (RAMP_HIGH - RAMP_LOW))
        } else {
            self.light
        }
    }
}

/// Low-frequency coloring noise remapped to roughly `[0, 1]`.
pub fn ramp_noise(sample: Vec3) -> f64 {
    let p = sample * RAMP_FREQ;
    let n = snoise3(p) * 0.5 + snoise3(p * 2.1) * 0.25 + snoise3(p * 4.3) * 0.125;
    n * 0.5 + 0.5
}

fn band_frequency(world: WorldId) -> Option<f64> {
    match world {
        WorldId::Skills => Some(18.0),
        WorldId::Experience => Some(22.0),
        WorldId::Personal | WorldId::Projects => None,
    }
}

/// Ramped albedo with the per-world signature overlay applied.
pub fn surface_color(
    sample: Vec3,
    normal: Vec3,
    world: WorldId,
    ramp: &ColorRamp,
    time_s: f64,
) -> Rgb {
    let mut col = ramp.eval(ramp_noise(sample));

    if let Some(freq) = band_frequency(world) {
        let lat = normal.normalize().y.abs();
        let bands = smoothstep(0.2, 0.9, (lat * freq + time_s * 0.1).sin() * 0.5 + 0.5);
        col = col.lerp(ramp.light, bands * 0.12);
        if world == WorldId::Experience {
            col = col.lerp(ramp.dark.scale(1.2), bands * 0.06);
        }
    }

    if world == WorldId::Projects {
        let ridged = 1.0 - snoise3(sample * 0.8).abs();
        col = col.scale(0.9 + ridged * 0.12);
    }

    col
}

/// Icy rim highlight weight; only the skills world carries one.
pub fn rim_boost(world: WorldId) -> f64 {
    if world == WorldId::Skills { 0.15 } else { 0.0 }
}

/// Full surface fragment: albedo, signature, then lighting.
#[allow(clippy::too_many_arguments)]
pub fn shade_surface(
    sample: Vec3,
    world_normal: Vec3,
    view: Vec3,
    world: WorldId,
    ramp: &ColorRamp,
    material: &Material,
    lights: &SceneLights,
    time_s: f64,
) -> Rgb {
    let albedo = surface_color(sample, world_normal, world, ramp, time_s);
    shade(albedo, world_normal, view, material, lights, rim_boost(world))
}
