/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_ms(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn as_ms(self) -> f64 {
        self.0 * 1000.0
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn add_seconds(self, dt_s: f64) -> Self {
        Time(self.0 + dt_s)
    }

    /// Elapsed seconds since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}
