//! Scalar easing and frame-rate independent smoothing.

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Hermite smoothstep between `edge0` and `edge1`.
///
/// Reversed edges (`edge0 > edge1`) produce a falling ramp.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = clamp01((x - edge0) / span);
    t * t * (3.0 - 2.0 * t)
}

/// Blend factor for an exponential approach: `1 - decay^dt`.
///
/// `decay` is the fraction of the remaining distance left after one second.
/// For `decay` in `(0, 1)` and `dt > 0` the factor is in `(0, 1)`, so the
/// approach never overshoots. Non-finite or negative `dt` yields 0.
#[inline]
pub fn damp_factor(decay: f64, dt_s: f64) -> f64 {
    if !dt_s.is_finite() || dt_s <= 0.0 {
        return 0.0;
    }
    clamp01(1.0 - decay.powf(dt_s))
}

/// Move `current` toward `target` by the exponential approach for `dt_s`.
#[inline]
pub fn damp(current: f64, target: f64, decay: f64, dt_s: f64) -> f64 {
    lerp(current, target, damp_factor(decay, dt_s))
}

#[cfg(test)]
mod tests {
    use super::{damp, damp_factor, lerp, smoothstep};

    #[test]
    fn smoothstep_edges_and_midpoint() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        // Falling ramp.
        assert_eq!(smoothstep(1.0, 0.78, 1.0), 0.0);
        assert_eq!(smoothstep(1.0, 0.78, 0.5), 1.0);
    }

    #[test]
    fn damp_factor_is_bounded() {
        assert_eq!(damp_factor(0.003, 0.0), 0.0);
        assert_eq!(damp_factor(0.003, f64::NAN), 0.0);
        let f = damp_factor(0.003, 1.0 / 60.0);
        assert!(f > 0.0 && f < 1.0);
        assert!((damp_factor(0.5, 1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn damp_never_overshoots() {
        let mut v = 0.0;
        for _ in 0..240 {
            let next = damp(v, 1.0, 0.004, 1.0 / 60.0);
            assert!(next > v && next <= 1.0);
            v = next;
        }
        assert!((1.0 - v) < 1e-6);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}
