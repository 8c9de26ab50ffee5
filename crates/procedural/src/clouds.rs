use foundation::Rgb;
use foundation::math::{Vec3, easing::smoothstep};

use crate::noise::snoise3;

/// Cloud shell radius relative to the planet.
pub const CLOUD_SHELL_SCALE: f64 = 1.03;
/// Cloud shell spin about Y (rad/s).
pub const CLOUD_SPIN: f64 = 0.09;
const CLOUD_FREQ: f64 = 3.0;
const MAX_ALPHA: f64 = 0.06;

pub fn cloud_sample_position(position: Vec3, time_s: f64) -> Vec3 {
    position * CLOUD_FREQ + Vec3::new(time_s * 0.04, time_s * 0.015, 0.0)
}

/// Cloud coverage alpha, faded toward the rim.
pub fn cloud_alpha(position: Vec3, normal: Vec3, view: Vec3, time_s: f64) -> f64 {
    let sp = cloud_sample_position(position, time_s);
    let n = snoise3(sp) * 0.5 + snoise3(sp * 2.2) * 0.25;
    let cover = smoothstep(0.1, 0.6, n * 0.5 + 0.5);
    let rim = normal.normalize().dot(view.normalize()).max(0.0).powf(0.8);
    cover * rim * MAX_ALPHA
}

pub fn cloud_color(base: Rgb) -> Rgb {
    base.lerp(Rgb::WHITE, 0.7)
}

#[cfg(test)]
mod tests {
    use super::{cloud_alpha, cloud_color};
    use foundation::Rgb;
    use foundation::math::Vec3;

    #[test]
    fn clouds_are_faint_and_vanish_at_rim() {
        let view = Vec3::new(0.0, 0.0, 1.0);
        for i in 0..50 {
            let a = i as f64 * 0.13;
            let p = Vec3::new(a.sin(), a.cos() * 0.5, 1.0).normalize();
            let alpha = cloud_alpha(p, p, view, i as f64);
            assert!((0.0..=0.06).contains(&alpha));
        }
        let side = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(cloud_alpha(side, side, view, 0.0), 0.0);
    }

    #[test]
    fn color_is_mostly_white() {
        let c = cloud_color(Rgb::new(0.08, 0.72, 0.65));
        assert!(c.r > 0.7 && c.g > 0.9);
    }
}
