use foundation::math::{Mat4, Vec3};

/// Local transform: scale, then XYZ Euler rotation, then translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn translate(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn rotate(rotation: Vec3) -> Self {
        Self {
            rotation,
            ..Self::identity()
        }
    }

    pub fn with_uniform_scale(mut self, s: f64) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_trs(self.translation, self.rotation, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::Vec3;

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.translation, Vec3::ZERO);
        assert_eq!(transform.matrix().transform_point(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn scaled_translation() {
        let t = Transform::translate(Vec3::new(4.0, 0.0, 1.0)).with_uniform_scale(1.45);
        let p = t.matrix().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(5.45, 0.0, 1.0)).length() < 1e-12);
    }
}
