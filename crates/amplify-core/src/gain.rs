//! Gain transfer function.
//!
//! Maps a motion estimate to a single non-negative gain through one of two
//! logistic curves:
//! - **Refinement** (slow, steady motion): keyed by raw angular speed,
//!   producing gains around or below 1 for precise pointing.
//! - **Ballistic** (fast or accelerating motion): keyed by raw angular
//!   acceleration, scaled by `f_scale`, producing gains well above 1 for
//!   large repositioning sweeps.
//!
//! A directional correction damps upward motion (which is ergonomically
//! expensive) down to `p_min_upward` and slightly boosts downward motion.
//! The correction only engages above the speed threshold so it never
//! perturbs refinement behavior.

use gazeshift_pose_model::params::{GainMode, SigmoidParams, TransferParams};

use crate::motion::MotionState;

/// Logistic gain curve: `min + (max - min) / (1 + e^{k(mid - x)})`.
///
/// The denominator is `1 + e^x > 0`, so the output is always finite and
/// bounded in `(min, max)`.
pub fn sigmoid(x: f32, params: &SigmoidParams) -> f32 {
    let span = params.max - params.min;
    params.min + span / (1.0 + (params.steepness * (params.inflection - x)).exp())
}

/// Gain computed for one tick. Never persisted beyond the tick, except
/// that the pipeline holds the last value while the velocity device is
/// unavailable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainResult {
    /// The scalar gain applied to this tick's rotation delta. Always >= 0.
    pub gain: f32,

    /// Directional correction factor that was folded into `gain`.
    pub vertical_correction: f32,

    /// Which curve produced the gain.
    pub mode: GainMode,
}

impl GainResult {
    /// Neutral 1:1 result used before the first velocity sample arrives.
    pub fn neutral() -> Self {
        Self {
            gain: 1.0,
            vertical_correction: 1.0,
            mode: GainMode::Refinement,
        }
    }
}

/// Evaluates the two-branch transfer function.
#[derive(Debug, Clone)]
pub struct GainEngine {
    params: TransferParams,
}

impl GainEngine {
    pub fn new(params: TransferParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TransferParams {
        &self.params
    }

    /// Compute the gain for one tick.
    ///
    /// `vertical_angle_deg` is the signed elevation of the previous cursor
    /// direction above the forward-gaze horizon; the upward/downward
    /// correction only applies while it is positive.
    pub fn evaluate(&self, motion: &MotionState, vertical_angle_deg: f32) -> GainResult {
        let p = &self.params;

        // Component convention: .x is the vertical (pitch) rate, .y the
        // horizontal (yaw) rate.
        let vert = motion.filtered_velocity.x;
        let hori = motion.filtered_velocity.y;
        let speed = motion.filtered_velocity.length();

        let mut correction = 1.0;
        if vertical_angle_deg > 0.0 && speed > p.speed_threshold {
            if vert > 0.0 {
                correction = 1.0 - (1.0 - p.p_min_upward) * vert.atan2(hori).sin();
            } else {
                correction = p.downward_boost;
            }
        }

        if speed < p.speed_threshold && motion.filtered_acceleration.abs() < p.accel_threshold {
            GainResult {
                gain: correction * sigmoid(motion.raw_velocity, &p.refinement),
                vertical_correction: correction,
                mode: GainMode::Refinement,
            }
        } else {
            GainResult {
                gain: p.f_scale * correction * sigmoid(motion.raw_acceleration, &p.ballistic),
                vertical_correction: correction,
                mode: GainMode::Ballistic,
            }
        }
    }
}
