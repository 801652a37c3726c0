//! Head pose sample types.
//!
//! One sample is captured per tick from the pose provider and superseded
//! by the next tick's sample. Coordinates are right-handed with `+Y` up;
//! the head's forward direction is `rotation * -Z`.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A single per-tick head pose reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadPoseSample {
    /// Head orientation as a unit quaternion.
    pub rotation: Quat,

    /// Head position in tracking space (meters).
    pub position: Vec3,

    /// Angular velocity in rad/s. `None` while the headset input device
    /// has not been detected; the pose itself still comes from the
    /// camera transform. Component convention follows the tracked axes:
    /// `.x` is the vertical (pitch) rate, `.y` the horizontal (yaw) rate.
    pub angular_velocity: Option<Vec3>,

    /// Time since the previous tick, in seconds. Must be positive.
    pub frame_dt: f32,
}

impl HeadPoseSample {
    /// Create a sample with a known angular velocity.
    pub fn new(rotation: Quat, position: Vec3, angular_velocity: Vec3, frame_dt: f32) -> Self {
        Self {
            rotation,
            position,
            angular_velocity: Some(angular_velocity),
            frame_dt,
        }
    }

    /// Create a sample for a tick where the velocity device was unavailable.
    pub fn without_velocity(rotation: Quat, position: Vec3, frame_dt: f32) -> Self {
        Self {
            rotation,
            position,
            angular_velocity: None,
            frame_dt,
        }
    }

    /// The head's forward-gaze direction (`rotation * -Z`).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Whether this tick carries a usable angular velocity reading.
    pub fn has_velocity(&self) -> bool {
        self.angular_velocity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pose_looks_down_negative_z() {
        let sample = HeadPoseSample::new(Quat::IDENTITY, Vec3::ZERO, Vec3::ZERO, 0.011);
        assert!((sample.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_yaw_rotates_forward() {
        // 90 degrees about +Y turns -Z into -X
        let rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let sample = HeadPoseSample::new(rot, Vec3::ZERO, Vec3::ZERO, 0.011);
        assert!((sample.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_sample_roundtrip() {
        let sample = HeadPoseSample::new(
            Quat::from_rotation_y(0.3),
            Vec3::new(0.0, 1.6, 0.0),
            Vec3::new(0.1, -0.2, 0.0),
            1.0 / 90.0,
        );
        let json = serde_json::to_string(&sample).unwrap();
        let parsed: HeadPoseSample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample, parsed);
    }
}
