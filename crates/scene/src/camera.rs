use foundation::math::{Vec3, easing::damp_factor};
use tracing::{debug, warn};

/// Camera eye position and look-at point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Larger of the position and target distances.
    pub fn distance(&self, other: &CameraPose) -> f64 {
        self.position
            .distance(other.position)
            .max(self.target.distance(other.target))
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChoreographyConfig {
    pub overview: CameraPose,
    /// How far from the overview position toward the focus point to move.
    pub nudge_fraction: f64,
    /// Focus point offset from the world's position.
    pub nudge_offset: Vec3,
    /// Fraction of the remaining distance left after one second.
    pub decay: f64,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            overview: CameraPose::new(Vec3::new(1.0, 10.0, 18.0), Vec3::new(1.0, 0.0, 0.0)),
            nudge_fraction: 0.3,
            nudge_offset: Vec3::new(0.0, 5.0, 10.0),
            decay: 0.003,
        }
    }
}

/// Eases the rendered camera between the overview pose and a partial nudge
/// toward the focused world.
///
/// `desired` changes discretely on retarget; `current` only ever moves by the
/// exponential approach, so a retarget mid-flight redirects without a jump.
#[derive(Debug, Clone)]
pub struct CameraChoreographer {
    config: ChoreographyConfig,
    current: CameraPose,
    desired: CameraPose,
}

impl CameraChoreographer {
    pub fn new(config: ChoreographyConfig) -> Self {
        Self {
            config,
            current: config.overview,
            desired: config.overview,
        }
    }

    pub fn config(&self) -> &ChoreographyConfig {
        &self.config
    }

    pub fn current(&self) -> CameraPose {
        self.current
    }

    pub fn desired(&self) -> CameraPose {
        self.desired
    }

    /// Pose for focusing a world at `world_position`.
    pub fn focus_pose(&self, world_position: Vec3) -> CameraPose {
        let overview = self.config.overview.position;
        let toward = world_position + self.config.nudge_offset;
        CameraPose::new(
            overview.lerp(toward, self.config.nudge_fraction),
            world_position,
        )
    }

    /// `None` returns to the overview pose.
    ///
    /// A non-finite world position is rejected and the previous desired pose
    /// is kept; the render loop must never see NaN.
    pub fn retarget(&mut self, focus: Option<Vec3>) {
        let desired = match focus {
            Some(p) if !p.is_finite() => {
                warn!(?p, "rejecting non-finite camera focus; keeping previous target");
                return;
            }
            Some(p) => self.focus_pose(p),
            None => self.config.overview,
        };
        debug!(?desired, "camera retarget");
        self.desired = desired;
    }

    pub fn update(&mut self, dt_s: f64) -> CameraPose {
        let k = damp_factor(self.config.decay, dt_s);
        self.current = CameraPose::new(
            self.current.position.lerp(self.desired.position, k),
            self.current.target.lerp(self.desired.target, k),
        );
        self.current
    }

    pub fn distance_to_desired(&self) -> f64 {
        self.current.distance(&self.desired)
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraChoreographer, CameraPose, ChoreographyConfig};
    use foundation::math::Vec3;

    #[test]
    fn camera_settles_slightly_faster_than_glow() {
        use crate::atmosphere::GlowConfig;
        use foundation::math::easing::damp;

        let camera = ChoreographyConfig::default().decay;
        let glow = GlowConfig::default().decay;
        assert_eq!((camera, glow), (0.003, 0.004));
        let after_one_second = |decay| (0..60).fold(1.0, |v, _| damp(v, 0.0, decay, 1.0 / 60.0));
        let (cam_left, glow_left) = (after_one_second(camera), after_one_second(glow));
        assert!(cam_left < glow_left);
        assert!(glow_left < 0.005);
    }

    #[test]
    fn focus_pose_is_a_partial_nudge() {
        let cam = CameraChoreographer::new(ChoreographyConfig::default());
        let projects = Vec3::new(4.0, 0.0, 1.0);
        let pose = cam.focus_pose(projects);
        // overview (1,10,18) lerped 30% toward (4,5,11).
        assert!((pose.position - Vec3::new(1.9, 8.5, 15.9)).length() < 1e-12);
        assert_eq!(pose.target, projects);
    }

    #[test]
    fn distance_decreases_monotonically_and_converges() {
        let mut cam = CameraChoreographer::new(ChoreographyConfig::default());
        cam.retarget(Some(Vec3::new(10.0, 0.0, -1.0)));

        let mut last = cam.distance_to_desired();
        let mut frames = 0;
        while last > 1e-3 {
            cam.update(1.0 / 60.0);
            let d = cam.distance_to_desired();
            assert!(d < last, "frame {frames}: {d} >= {last}");
            last = d;
            frames += 1;
            assert!(frames < 600, "did not converge in 10 s");
        }
    }

    #[test]
    fn retarget_mid_flight_is_continuous() {
        let mut cam = CameraChoreographer::new(ChoreographyConfig::default());
        cam.retarget(Some(Vec3::new(-8.0, 0.0, 0.0)));
        for _ in 0..30 {
            cam.update(1.0 / 60.0);
        }
        let before = cam.current();
        cam.retarget(None);
        assert_eq!(cam.current(), before);
        assert_eq!(cam.desired(), ChoreographyConfig::default().overview);
    }

    #[test]
    fn non_finite_focus_is_ignored() {
        let mut cam = CameraChoreographer::new(ChoreographyConfig::default());
        cam.retarget(Some(Vec3::new(4.0, 0.0, 1.0)));
        let desired = cam.desired();
        cam.retarget(Some(Vec3::new(f64::NAN, 0.0, 0.0)));
        assert_eq!(cam.desired(), desired);
        let pose: CameraPose = cam.update(0.016);
        assert!(pose.is_finite());
    }
}
