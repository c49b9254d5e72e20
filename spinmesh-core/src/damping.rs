/// Exponential damping toward a target value
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Move `current` a fraction `factor` of the way toward `target`.
///
/// Applied once per frame this is a first-order low-pass filter: after `n`
/// steps the remaining gap is `(target - initial) * (1 - factor)^n`.
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Convert a per-frame factor tuned at `reference_hz` into the factor for a
/// frame that took `elapsed`.
pub fn time_scaled_factor(factor: f32, elapsed: Duration, reference_hz: f32) -> f32 {
    let frames = elapsed.as_secs_f32() * reference_hz;
    1.0 - (1.0 - factor).powf(frames)
}

/// How damping factors are applied on each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DampingMode {
    /// The factor is applied once per tick, whatever the tick length.
    /// Convergence speed in wall-clock time follows the refresh rate.
    PerTick,
    /// The factor is treated as tuned for `reference_hz` and rescaled by the
    /// elapsed time of each tick.
    TimeScaled { reference_hz: f32 },
}

impl DampingMode {
    pub fn effective_factor(&self, factor: f32, elapsed: Duration) -> f32 {
        match *self {
            DampingMode::PerTick => factor,
            DampingMode::TimeScaled { reference_hz } => {
                time_scaled_factor(factor, elapsed, reference_hz)
            }
        }
    }
}

impl Default for DampingMode {
    fn default() -> Self {
        DampingMode::PerTick
    }
}
