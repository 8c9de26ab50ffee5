use foundation::Rgb;
use foundation::math::Vec3;

use crate::Fragment;

/// Shell radius relative to the planet.
pub const SHELL_RADIUS: f64 = 1.12;
pub const FRESNEL_POWER: i32 = 3;
const ALPHA_SCALE: f64 = 0.35;

/// `(1 - max(N·V, 0))^power`: 0 facing the viewer, 1 at the silhouette.
pub fn fresnel(normal: Vec3, view: Vec3, power: i32) -> f64 {
    (1.0 - normal.normalize().dot(view.normalize()).max(0.0)).powi(power)
}

/// Additive rim glow for the back faces of the atmosphere shell.
pub fn fresnel_glow(color: Rgb, normal: Vec3, view: Vec3, intensity: f64) -> Fragment {
    let f = fresnel(normal, view, FRESNEL_POWER);
    Fragment {
        color: color.scale(f * intensity),
        alpha: f * intensity * ALPHA_SCALE,
    }
}
