use foundation::math::easing::{clamp01, smoothstep};
use foundation::time::Time;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingConfig {
    /// Duration of the eased progress ramp.
    pub ramp_ms: f64,
    /// Highest percentage shown before the renderer is ready.
    pub cap_percent: f64,
    /// Delay between first-frame creation and readiness.
    pub ready_delay_ms: f64,
    pub fade_ms: f64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            ramp_ms: 2000.0,
            cap_percent: 95.0,
            ready_delay_ms: 600.0,
            fade_ms: 800.0,
        }
    }
}

/// Progress overlay shown while the renderer starts.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    config: LoadingConfig,
    started: Time,
    created_at: Option<Time>,
}

impl LoadingIndicator {
    pub fn new(config: LoadingConfig, now: Time) -> Self {
        Self {
            config,
            started: now,
            created_at: None,
        }
    }

    /// Records the first rendered frame. Later calls are ignored.
    pub fn mark_renderer_created(&mut self, now: Time) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
    }

    pub fn ready_at(&self) -> Option<Time> {
        self.created_at
            .map(|t| t.add_seconds(self.config.ready_delay_ms / 1000.0))
    }

    pub fn is_ready(&self, now: Time) -> bool {
        self.ready_at().is_some_and(|t| now.0 >= t.0)
    }

    /// Whole percent; stays at or below the cap until ready.
    pub fn progress_percent(&self, now: Time) -> u32 {
        if self.is_ready(now) {
            return 100;
        }
        let t = clamp01(now.since(self.started) * 1000.0 / self.config.ramp_ms);
        (smoothstep(0.0, 1.0, t) * self.config.cap_percent).round() as u32
    }

    pub fn opacity(&self, now: Time) -> f64 {
        let Some(ready) = self.ready_at() else {
            return 1.0;
        };
        if now.0 < ready.0 {
            return 1.0;
        }
        let t = clamp01(now.since(ready) * 1000.0 / self.config.fade_ms);
        1.0 - smoothstep(0.0, 1.0, t)
    }

    pub fn is_visible(&self, now: Time) -> bool {
        self.opacity(now) > 0.0
    }

    /// The overlay swallows pointer input until it starts fading.
    pub fn blocks_input(&self, now: Time) -> bool {
        !self.is_ready(now)
    }
}
