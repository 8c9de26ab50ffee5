use std::f64::consts::TAU;

use foundation::Rgb;
use foundation::math::easing::smoothstep;

use crate::Fragment;
use crate::mesh::MeshData;

pub const RING_INNER_RADIUS: f64 = 1.35;
pub const RING_OUTER_RADIUS: f64 = 2.1;
pub const RING_THETA_SEGMENTS: u32 = 128;
pub const RING_RADIAL_SEGMENTS: u32 = 24;
/// Radius of the accent torus that sits inside the gap.
pub const ACCENT_RADIUS: f64 = 1.68;
/// Normalized radial position of the gap center.
pub const GAP_CENTER: f64 = 0.58;

/// Flat annulus in the XZ plane built from an explicit radial/angular grid.
///
/// `uv.x` is the normalized radius (0 inner, 1 outer) and `uv.y` the
/// normalized angle, which is what [`ring_fragment`] expects.
pub fn polar_ring_mesh(
    inner_radius: f64,
    outer_radius: f64,
    theta_segments: u32,
    radial_segments: u32,
) -> MeshData {
    let theta_segments = theta_segments.max(3);
    let radial_segments = radial_segments.max(1);

    let mut mesh = MeshData::default();
    for r in 0..=radial_segments {
        let t = r as f64 / radial_segments as f64;
        let radius = inner_radius + (outer_radius - inner_radius) * t;
        for s in 0..=theta_segments {
            let a = s as f64 / theta_segments as f64;
            let (sin_a, cos_a) = (a * TAU).sin_cos();
            mesh.positions
                .push([(cos_a * radius) as f32, 0.0, (sin_a * radius) as f32]);
            mesh.normals.push([0.0, 1.0, 0.0]);
            mesh.uvs.push([t as f32, a as f32]);
        }
    }

    let stride = theta_segments + 1;
    for r in 0..radial_segments {
        for s in 0..theta_segments {
            let a = r * stride + s;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}

/// Dimming factor of the gap: 0.3 at its center, ~1 away from it.
pub fn gap_factor(r: f64) -> f64 {
    1.0 - 0.7 * (-((r - GAP_CENTER) * 18.0).powi(2)).exp()
}

/// Banded ring shading at normalized radius `r` and angle `a`.
pub fn ring_fragment(base: Rgb, r: f64, a: f64) -> Fragment {
    let mut band = 0.5 + 0.3 * (r * 120.0).sin();
    band *= 0.6 + 0.4 * (r * 50.0 + 1.3).sin();
    band *= 0.7 + 0.3 * (r * 18.0 + 2.7).sin();

    band *= 0.85 + 0.15 * (a * TAU * 8.0 + r * 20.0).sin();
    band *= gap_factor(r);

    let inner = smoothstep(0.0, 0.12, r);
    let outer = smoothstep(1.0, 0.78, r);

    Fragment {
        color: base.scale(0.7 + 0.5 * r),
        alpha: band * inner * outer * 0.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMBER: Rgb = Rgb::new(0.96, 0.62, 0.04);

    #[test]
    fn mesh_spans_inner_to_outer_radius() {
        let mesh = polar_ring_mesh(RING_INNER_RADIUS, RING_OUTER_RADIUS, 128, 24);
        assert_eq!(mesh.vertex_count(), 25 * 129);
        assert_eq!(mesh.triangle_count(), 24 * 128 * 2);
        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt() as f64;
            let expected = RING_INNER_RADIUS + (RING_OUTER_RADIUS - RING_INNER_RADIUS) * uv[0] as f64;
            assert!((r - expected).abs() < 1e-4);
            assert_eq!(p[1], 0.0);
        }
    }

    #[test]
    fn edges_fade_out() {
        assert_eq!(ring_fragment(AMBER, 0.0, 0.3).alpha, 0.0);
        assert_eq!(ring_fragment(AMBER, 1.0, 0.3).alpha, 0.0);
    }

    #[test]
    fn gap_darkens_the_band_center() {
        assert!((gap_factor(GAP_CENTER) - 0.3).abs() < 1e-12);
        assert!(gap_factor(0.3) > 0.99);
        assert!(gap_factor(0.75) > 0.99);
    }

    #[test]
    fn alpha_is_bounded() {
        for i in 0..=200 {
            let r = i as f64 / 200.0;
            let f = ring_fragment(AMBER, r, r * 0.37);
            assert!((0.0..=0.7).contains(&f.alpha), "alpha {} at r={r}", f.alpha);
        }
    }
}
