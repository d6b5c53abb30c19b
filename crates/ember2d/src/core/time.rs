/// Frame times below this threshold (about one millisecond) skip motion
/// integration entirely. A near-zero step makes the drag and velocity
/// decisions numerically unstable, so the guard is part of the contract,
/// not a tuning knob.
pub const MOTION_EPSILON: f32 = 0.001;

/// Converts host-measured frame times (milliseconds) into the scaled
/// delta-time fed to every time-dependent computation.
pub struct FrameClock {
    /// Multiplier from wall time to game time. 1.0 is real time, 0.5 is
    /// half-speed slow motion, 2.0 is double speed.
    pub time_scale: f32,
    last_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            last_dt: 0.0,
        }
    }

    /// Record a frame's elapsed time in milliseconds and return the scaled
    /// delta in seconds.
    pub fn advance(&mut self, elapsed_ms: f32) -> f32 {
        self.last_dt = (elapsed_ms / 1000.0) * self.time_scale;
        self.last_dt
    }

    /// The delta returned by the most recent `advance`.
    pub fn dt(&self) -> f32 {
        self.last_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
