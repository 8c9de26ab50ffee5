use foundation::math::easing::damp;

/// Tuning for the rim-glow intensity smoothing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlowConfig {
    /// Fraction of the remaining distance left after one second.
    pub decay: f64,
    pub highlighted: f64,
    pub idle: f64,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            decay: 0.004,
            highlighted: 0.85,
            idle: 0.4,
        }
    }
}

/// Glow intensity that eases toward the highlighted or idle level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AtmosphereGlow {
    config: GlowConfig,
    intensity: f64,
    highlighted: bool,
}

impl AtmosphereGlow {
    pub fn new(config: GlowConfig) -> Self {
        Self {
            config,
            intensity: config.idle,
            highlighted: false,
        }
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn target(&self) -> f64 {
        if self.highlighted {
            self.config.highlighted
        } else {
            self.config.idle
        }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn update(&mut self, dt_s: f64) -> f64 {
        self.intensity = damp(self.intensity, self.target(), self.config.decay, dt_s);
        self.intensity
    }
}
