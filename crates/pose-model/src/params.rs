//! Transfer-function tunables.
//!
//! These parameters are fixed for the lifetime of a pipeline instance;
//! the defaults reproduce the tuning of the reference head-pointing
//! transfer function.

use serde::{Deserialize, Serialize};

/// Parameters of one logistic gain curve:
/// `min + (max - min) / (1 + e^{steepness * (inflection - x)})`.
///
/// Strictly increasing in `x`, asymptoting to `min` as `x -> -inf` and
/// `max` as `x -> +inf`, with the midpoint value at `x = inflection`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams {
    /// Upper asymptote of the curve.
    pub max: f32,
    /// Lower asymptote of the curve.
    pub min: f32,
    /// Input value at which the curve crosses its midpoint.
    pub inflection: f32,
    /// Slope factor; larger values give a sharper transition.
    pub steepness: f32,
}

impl SigmoidParams {
    /// Ballistic curve defaults, keyed by raw angular acceleration.
    pub const BALLISTIC: SigmoidParams = SigmoidParams {
        max: 5.5,
        min: 0.5,
        inflection: 6.5,
        steepness: 0.35,
    };

    /// Refinement curve defaults, keyed by raw angular speed.
    pub const REFINEMENT: SigmoidParams = SigmoidParams {
        max: 1.2,
        min: 0.5,
        inflection: 0.3,
        steepness: 7.0,
    };
}

/// Which gain curve produced a tick's gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainMode {
    /// Low-velocity, low-acceleration regime: velocity-keyed curve,
    /// intended for precise pointing.
    Refinement,
    /// Threshold-exceeding regime: acceleration-keyed curve scaled by
    /// `f_scale`, intended for fast large-angle repositioning.
    Ballistic,
}

/// Tunable parameters of the amplification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Gain curve used in ballistic (fast repositioning) mode.
    pub ballistic: SigmoidParams,

    /// Gain curve used in refinement (precise pointing) mode.
    pub refinement: SigmoidParams,

    /// Filtered angular speed (rad/s) below which the pipeline stays in
    /// refinement mode and vertical correction is suppressed.
    pub speed_threshold: f32,

    /// Filtered angular acceleration (rad/s^2) below which the pipeline
    /// stays in refinement mode.
    pub accel_threshold: f32,

    /// Floor of the upward-motion correction factor. Gain for upward
    /// motion is scaled down but never below this ratio.
    pub p_min_upward: f32,

    /// Fixed correction factor applied to downward motion above the
    /// speed threshold.
    pub downward_boost: f32,

    /// Output scale applied on top of the ballistic curve.
    pub f_scale: f32,

    /// Half-angle of the bounding cone around the forward gaze, degrees.
    pub bound_half_angle_deg: f32,
}

impl Default for TransferParams {
    fn default() -> Self {
        Self {
            ballistic: SigmoidParams::BALLISTIC,
            refinement: SigmoidParams::REFINEMENT,
            speed_threshold: 0.2,
            accel_threshold: 1.0,
            p_min_upward: 0.87,
            downward_boost: 1.1,
            f_scale: 1.1,
            bound_half_angle_deg: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let params = TransferParams::default();
        assert_eq!(params.ballistic.max, 5.5);
        assert_eq!(params.ballistic.inflection, 6.5);
        assert_eq!(params.refinement.max, 1.2);
        assert_eq!(params.speed_threshold, 0.2);
        assert_eq!(params.bound_half_angle_deg, 15.0);
    }

    #[test]
    fn test_params_roundtrip() {
        let params = TransferParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: TransferParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, parsed);
    }
}
