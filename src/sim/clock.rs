//! Fixed-step scheduler
//!
//! Measured frame time is accumulated and spent in whole simulation steps.
//! Physics itself never sees the measured delta: every step applies the same
//! per-tick increments.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame time accepted; longer stalls (debugger, window drag) are cut
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    accumulator: f32,
    dt: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            dt,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add `elapsed` seconds and return how many steps to run now.
    ///
    /// When the step budget runs out the leftover whole steps are dropped so
    /// a slow frame can't snowball into ever longer catch-up frames.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if elapsed.is_finite() {
            self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);
        }

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator %= self.dt;
        }
        steps
    }
}
