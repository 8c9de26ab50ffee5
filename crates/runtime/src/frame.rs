use foundation::time::Time;

/// Largest step a single frame may advance, in seconds.
///
/// Tabbed-out pages can deliver multi-second gaps between animation frames;
/// clamping keeps damped motion from jumping straight to its target.
pub const MAX_FRAME_DT_S: f64 = 0.1;

/// Frame metadata handed to every per-frame update.
///
/// `time` is scene time: the sum of clamped deltas, not wall-clock time, so a
/// recorded sequence of `dt_s` values replays identically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta time (seconds) since the previous frame.
    pub dt_s: f64,
    /// Scene time at the end of this frame's step (seconds).
    pub time: Time,
}

impl Frame {
    /// Fixed-step frame, used by tests and replays.
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}

/// Turns host timestamps (e.g. `requestAnimationFrame` milliseconds) into frames.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    index: u64,
    time: Time,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock to `now_ms`.
    ///
    /// The first tick has `dt_s == 0`. Non-monotonic or non-finite timestamps
    /// produce a zero step rather than a negative one.
    pub fn tick(&mut self, now_ms: f64) -> Frame {
        let dt_s = match self.last_ms {
            Some(last) if now_ms.is_finite() => {
                ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT_S)
            }
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }

        self.time = self.time.add_seconds(dt_s);
        let frame = Frame {
            index: self.index,
            dt_s,
            time: self.time,
        };
        self.index += 1;
        frame
    }

    pub fn time(&self) -> Time {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameClock, MAX_FRAME_DT_S};
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::new(0, 0.5);
        let f1 = f0.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
    }

    #[test]
    fn clock_starts_at_zero_and_accumulates() {
        let mut clock = FrameClock::new();
        let f0 = clock.tick(1000.0);
        assert_eq!(f0.index, 0);
        assert_eq!(f0.dt_s, 0.0);

        let f1 = clock.tick(1050.0);
        assert_eq!(f1.index, 1);
        assert!((f1.dt_s - 0.05).abs() < 1e-12);
        assert!((f1.time.seconds() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn clock_clamps_long_gaps_and_backwards_time() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        assert_eq!(clock.tick(5000.0).dt_s, MAX_FRAME_DT_S);
        assert_eq!(clock.tick(4000.0).dt_s, 0.0);
        assert_eq!(clock.tick(f64::NAN).dt_s, 0.0);
    }
}
