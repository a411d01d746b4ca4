use crate::constants::{
    GLOW_BASE, GLOW_HZ, GLOW_SWING, LIGHT_BASE_INTENSITY, LIGHT_PULSE, MAX_FRAME_DELTA_SEC,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Clamped delta for this frame in seconds.
    pub dt: f32,
    /// Accumulated animation time in seconds.
    pub elapsed: f64,
}

/// Shared time accumulator for the per-frame driver.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    elapsed: f64,
    max_delta: f32,
    frames: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA_SEC)
    }
}

impl AnimationClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            elapsed: 0.0,
            max_delta: max_delta.max(0.0),
            frames: 0,
        }
    }

    /// Advance by a raw wall-clock delta. Long gaps (hidden tab, debugger)
    /// are clamped to `max_delta`; negative or non-finite deltas count as zero.
    pub fn tick(&mut self, raw_dt_sec: f32) -> FrameTime {
        let dt = if raw_dt_sec.is_finite() {
            raw_dt_sec.clamp(0.0, self.max_delta)
        } else {
            0.0
        };
        self.elapsed += dt as f64;
        self.frames += 1;
        FrameTime {
            dt,
            elapsed: self.elapsed,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Opacity of the glow sprite behind the hovered icon.
#[inline]
pub fn glow_opacity(elapsed: f64) -> f32 {
    GLOW_BASE + (elapsed as f32 * GLOW_HZ).sin() * GLOW_SWING
}

/// Key light intensity; a slow breathing pulse.
#[inline]
pub fn light_intensity(elapsed: f64) -> f32 {
    LIGHT_BASE_INTENSITY + (elapsed as f32 * 0.5).sin() * LIGHT_PULSE
}
