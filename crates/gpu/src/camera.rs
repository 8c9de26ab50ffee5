use foundation::math::{Mat4, Vec2, Vec3};
use scene::{CameraPose, Ray};

pub const DEFAULT_FOV_Y_DEG: f64 = 55.0;
pub const DEFAULT_NEAR: f64 = 0.1;
pub const DEFAULT_FAR: f64 = 200.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
    /// Viewport width / height.
    pub aspect: f64,
}

impl Camera3D {
    pub fn look_at(position: Vec3, target: Vec3, fov_y_rad: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            fov_y_rad,
            near,
            far,
            aspect: 1.0,
        }
    }

    /// Perspective camera at `pose` with the default lens.
    pub fn from_pose(pose: CameraPose, width: u32, height: u32) -> Self {
        Self::look_at(
            pose.position,
            pose.target,
            DEFAULT_FOV_Y_DEG.to_radians(),
            DEFAULT_NEAR,
            DEFAULT_FAR,
        )
        .with_viewport(width, height)
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.aspect = width.max(1) as f64 / height.max(1) as f64;
        self
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_z0(self.fov_y_rad, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection().mul(&self.view())
    }

    /// Pixel position of a world point, `(0, 0)` top-left. `None` when the
    /// point is behind the camera or outside the depth range.
    pub fn project_to_screen(&self, p: Vec3, width: u32, height: u32) -> Option<Vec2> {
        let ndc = self.view_proj().project_point(p)?;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width as f64,
            (1.0 - ndc.y) * 0.5 * height as f64,
        ))
    }

    /// World-space ray through a pixel, with `(0, 0)` the top-left corner.
    ///
    /// Returns `None` for a degenerate viewport or a pixel outside it.
    pub fn screen_ray(&self, x_px: f64, y_px: f64, width: u32, height: u32) -> Option<Ray> {
        if width == 0 || height == 0 || !x_px.is_finite() || !y_px.is_finite() {
            return None;
        }
        let (w, h) = (width as f64, height as f64);
        if !(0.0..=w).contains(&x_px) || !(0.0..=h).contains(&y_px) {
            return None;
        }

        let ndc_x = 2.0 * x_px / w - 1.0;
        let ndc_y = 1.0 - 2.0 * y_px / h;
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        let half = (0.5 * self.fov_y_rad).tan();
        let aspect = w / h;

        let dir = forward + right * (ndc_x * half * aspect) + up * (ndc_y * half);
        Some(Ray::new(self.position, dir))
    }
}
