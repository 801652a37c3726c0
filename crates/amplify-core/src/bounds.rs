//! Angular bounding clamp.
//!
//! The amplified cursor direction is confined to a cone around the
//! current forward-gaze direction so the cursor can never drift outside
//! the wearer's view.

use glam::{Quat, Vec3};

/// Clamps directions into a cone of a fixed half-angle around forward.
#[derive(Debug, Clone, Copy)]
pub struct BoundClamp {
    half_angle_deg: f32,
}

impl BoundClamp {
    pub fn new(half_angle_deg: f32) -> Self {
        Self { half_angle_deg }
    }

    pub fn half_angle_deg(&self) -> f32 {
        self.half_angle_deg
    }

    /// Clamp `direction` to within the cone around `forward`.
    ///
    /// Inside the cone the direction passes through unchanged. Outside,
    /// the result is `forward` rotated by exactly the half-angle about
    /// `forward x direction`, which preserves the direction's bearing
    /// while pinning its deviation. Directions parallel to `forward`
    /// (degenerate cross product) pass through.
    pub fn clamp(&self, direction: Vec3, forward: Vec3) -> Vec3 {
        let angle_deg = forward.angle_between(direction).to_degrees();
        if angle_deg <= self.half_angle_deg {
            return direction;
        }

        let Some(axis) = forward.cross(direction).try_normalize() else {
            return direction;
        };

        Quat::from_axis_angle(axis, self.half_angle_deg.to_radians()) * forward
    }
}
