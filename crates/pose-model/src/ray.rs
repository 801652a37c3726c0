//! Cursor ray type.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A pointing ray: an origin and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Ray origin in tracking space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    /// The forward-gaze ray of a head pose: origin at the head position,
    /// direction `rotation * -Z`.
    pub fn forward_of(position: Vec3, rotation: Quat) -> Self {
        Self::new(position, rotation * Vec3::NEG_Z)
    }

    /// Signed elevation of the direction above the horizontal plane,
    /// in degrees. Positive = pointing above the horizon.
    pub fn elevation_deg(&self) -> f32 {
        elevation_deg(self.direction)
    }

    /// Angle between this ray's direction and another direction, degrees.
    pub fn angle_to_deg(&self, other: Vec3) -> f32 {
        self.direction.angle_between(other).to_degrees()
    }
}

/// Signed elevation of a unit direction above the horizontal plane, degrees.
pub fn elevation_deg(direction: Vec3) -> f32 {
    direction.y.clamp(-1.0, 1.0).asin().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_of_identity() {
        let ray = Ray::forward_of(Vec3::new(0.0, 1.6, 0.0), Quat::IDENTITY);
        assert_eq!(ray.origin, Vec3::new(0.0, 1.6, 0.0));
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_elevation_sign() {
        let up_ish = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, -1.0));
        let down_ish = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));
        assert!(up_ish.elevation_deg() > 0.0);
        assert!(down_ish.elevation_deg() < 0.0);
        assert!((up_ish.elevation_deg() - 45.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_direction_always_unit(
            x in -10.0f32..10.0,
            y in -10.0f32..10.0,
            z in -10.0f32..10.0,
        ) {
            let v = Vec3::new(x, y, z);
            prop_assume!(v.length() > 1e-3);

            let ray = Ray::new(Vec3::ZERO, v);
            prop_assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            prop_assert!((-90.0..=90.0).contains(&ray.elevation_deg()));
        }
    }
}
