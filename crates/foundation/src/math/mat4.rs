use super::Vec3;

/// Column-major 4x4 matrix: `m[col][row]`.
///
/// Conventions match the GPU side: right-handed, `Y` up, clip depth in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub m: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_translation(t: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[3] = [t.x, t.y, t.z, 1.0];
        out
    }

    pub fn from_scale(s: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = s.x;
        out.m[1][1] = s.y;
        out.m[2][2] = s.z;
        out
    }

    pub fn rotation_x(a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_y(a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self {
            m: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_z(a: f64) -> Self {
        let (s, c) = a.sin_cos();
        Self {
            m: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Euler rotation applied in `X`, then `Y`, then `Z` intrinsic order
    /// (`R = Rx * Ry * Rz`).
    pub fn from_euler_xyz(r: Vec3) -> Self {
        Self::rotation_x(r.x)
            .mul(&Self::rotation_y(r.y))
            .mul(&Self::rotation_z(r.z))
    }

    /// Translation * rotation * scale.
    pub fn from_trs(translation: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self::from_translation(translation)
            .mul(&Self::from_euler_xyz(rotation))
            .mul(&Self::from_scale(scale))
    }

    pub fn mul(&self, b: &Mat4) -> Mat4 {
        let a = &self.m;
        let mut c = [[0.0f64; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                c[col][row] = a[0][row] * b.m[col][0]
                    + a[1][row] * b.m[col][1]
                    + a[2][row] * b.m[col][2]
                    + a[3][row] * b.m[col][3];
            }
        }
        Mat4 { m: c }
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
            m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        )
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
        )
    }

    /// Homogeneous transform followed by the perspective divide. `None` when
    /// the point lands on or behind the projection plane.
    pub fn project_point(&self, p: Vec3) -> Option<Vec3> {
        let m = &self.m;
        let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3];
        if w <= f64::EPSILON {
            return None;
        }
        Some(self.transform_point(p) * (1.0 / w))
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    /// Length of the transformed X basis vector. Exact for uniform scale.
    pub fn max_scale(&self) -> f64 {
        let x = Vec3::new(self.m[0][0], self.m[0][1], self.m[0][2]).length();
        let y = Vec3::new(self.m[1][0], self.m[1][1], self.m[1][2]).length();
        let z = Vec3::new(self.m[2][0], self.m[2][1], self.m[2][2]).length();
        x.max(y).max(z)
    }

    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        Self {
            m: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }

    pub fn perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (0.5 * fov_y_rad).tan();
        Self {
            m: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, far / (near - far), -1.0],
                [0.0, 0.0, (near * far) / (near - far), 0.0],
            ],
        }
    }

    pub fn to_f32(&self) -> [[f32; 4]; 4] {
        let mut out = [[0.0f32; 4]; 4];
        for (col, src) in self.m.iter().enumerate() {
            for (row, v) in src.iter().enumerate() {
                out[col][row] = *v as f32;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Mat4;
    use crate::math::Vec3;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn trs_applies_scale_then_rotation_then_translation() {
        let m = Mat4::from_trs(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0),
            Vec3::splat(2.0),
        );
        // +X scaled to 2, rotated about Y to -Z, then translated.
        let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(close(p, Vec3::new(10.0, 0.0, -2.0)));
        assert!((m.max_scale() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn look_at_maps_target_onto_negative_z() {
        let eye = Vec3::new(1.0, 10.0, 18.0);
        let target = Vec3::new(1.0, 0.0, 0.0);
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let p = view.transform_point(target);
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
        assert!(p.z < 0.0);
        assert!((p.z + eye.distance(target)).abs() < 1e-9);
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.mul(&Mat4::IDENTITY), m);
        assert_eq!(Mat4::IDENTITY.transform_vector(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn projection_maps_near_and_far_to_unit_depth_range() {
        let proj = Mat4::perspective_rh_z0(1.0, 1.5, 0.1, 200.0);
        let near = proj.project_point(Vec3::new(0.0, 0.0, -0.1)).unwrap();
        let far = proj.project_point(Vec3::new(0.0, 0.0, -200.0)).unwrap();
        assert!(near.z.abs() < 1e-9);
        assert!((far.z - 1.0).abs() < 1e-9);
        assert!(proj.project_point(Vec3::new(0.0, 0.0, 1.0)).is_none());
    }
}
