//! Fractional rotation amplification.
//!
//! Applies the head's per-tick rotation delta `gain` times to the cursor,
//! continuously across non-integer gains: gains below 1 damp the motion
//! (fine control), gains above 1 amplify it (ballistic pointing), with no
//! discontinuity as the gain crosses integer boundaries.

use glam::Quat;

/// Gains within this distance of an integer are treated as exact.
const INTEGER_TOLERANCE: f32 = 1e-4;

/// Amplify a rotation delta by a non-negative gain.
///
/// - `gain < 1`: spherical interpolation from identity toward `delta`.
/// - `gain >= 1`: `delta` composed with itself `floor(gain)` times, then
///   one further fractional composition by slerp toward the next integer
///   power.
///
/// The composition count is bounded by the gain, which the transfer
/// curves bound by their `max` parameter.
pub fn amplify_rotation(delta: Quat, gain: f32) -> Quat {
    if gain < 1.0 {
        return Quat::IDENTITY.slerp(delta, gain.max(0.0));
    }

    let whole = gain.floor();
    let mut rotation = delta;
    for _ in 1..whole as u32 {
        rotation = delta * rotation;
    }

    let fraction = gain - whole;
    if fraction < INTEGER_TOLERANCE {
        return rotation;
    }

    rotation.slerp(delta * rotation, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// 10 degrees about +Y.
    fn ten_deg_y() -> Quat {
        Quat::from_rotation_y(10f32.to_radians())
    }

    fn angle_deg(q: Quat) -> f32 {
        // glam returns the axis-angle with angle in [0, 2pi); fold to [0, pi]
        let (_, angle) = q.to_axis_angle();
        let angle = angle.to_degrees();
        if angle > 180.0 {
            360.0 - angle
        } else {
            angle
        }
    }

    #[test]
    fn test_zero_gain_is_identity() {
        let out = amplify_rotation(ten_deg_y(), 0.0);
        assert!(angle_deg(out) < 1e-4);
    }

    #[test]
    fn test_fractional_gain_is_slerp_from_identity() {
        let delta = ten_deg_y();
        let out = amplify_rotation(delta, 0.5);
        assert!((angle_deg(out) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_gain_approaching_one_approaches_delta() {
        let delta = ten_deg_y();
        let out = amplify_rotation(delta, 0.999);
        assert!((angle_deg(out) - 9.99).abs() < 0.01);
    }

    #[test]
    fn test_integer_gains_compose_delta() {
        let delta = ten_deg_y();
        for n in 1..=3 {
            let out = amplify_rotation(delta, n as f32);
            assert!(
                (angle_deg(out) - 10.0 * n as f32).abs() < 1e-3,
                "gain {n} should give {}-degree rotation",
                10 * n
            );
        }
    }

    #[test]
    fn test_fractional_gain_above_one() {
        let delta = ten_deg_y();
        let out = amplify_rotation(delta, 2.5);
        assert!((angle_deg(out) - 25.0).abs() < 0.05);
    }

    #[test]
    fn test_continuity_across_integer_boundary() {
        let delta = ten_deg_y();
        let below = amplify_rotation(delta, 1.9999);
        let at = amplify_rotation(delta, 2.0);
        assert!((angle_deg(below) - angle_deg(at)).abs() < 0.01);
    }

    #[test]
    fn test_identity_delta_stays_identity_for_any_gain() {
        for gain in [0.0, 0.3, 1.0, 2.7, 5.5] {
            let out = amplify_rotation(Quat::IDENTITY, gain);
            assert!(angle_deg(out) < 1e-4, "gain {gain}");
        }
    }

    #[test]
    fn test_amplified_rotation_keeps_axis() {
        let delta = ten_deg_y();
        let out = amplify_rotation(delta, 3.0);
        let rotated = out * Vec3::NEG_Z;
        // Rotation about +Y keeps the direction in the XZ plane
        assert!(rotated.y.abs() < 1e-5);
    }
}
