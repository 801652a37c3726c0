//! Motion estimation from raw angular-velocity samples.
//!
//! Each tick the estimator ingests the head's raw angular velocity and
//! produces the smoothed velocity vector, the smoothed acceleration
//! scalar, and the raw magnitudes the gain curves are keyed on. The
//! acceleration estimate is a backward finite difference over a 2-sample
//! sliding window of velocity magnitudes, so it only becomes available
//! on the second tick.

use glam::Vec3;

use crate::filter::{OneEuroFilter, OneEuroFilterVec3};

/// Fixed-capacity FIFO of the last two raw velocity magnitudes.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityWindow {
    slots: [f32; 2],
    len: usize,
}

impl VelocityWindow {
    /// Push a magnitude, evicting the oldest entry once full.
    pub fn push(&mut self, magnitude: f32) {
        if self.len < 2 {
            self.slots[self.len] = magnitude;
            self.len += 1;
        } else {
            self.slots[0] = self.slots[1];
            self.slots[1] = magnitude;
        }
    }

    /// Number of samples held (never exceeds 2).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether both slots are populated.
    pub fn is_full(&self) -> bool {
        self.len == 2
    }

    /// Newest magnitude minus oldest. Only meaningful when full.
    pub fn delta(&self) -> f32 {
        self.slots[1] - self.slots[0]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

/// Per-tick motion estimate consumed by the gain engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionState {
    /// Magnitude of the raw (unfiltered) angular velocity, rad/s.
    pub raw_velocity: f32,

    /// Low-pass filtered angular velocity vector, rad/s.
    pub filtered_velocity: Vec3,

    /// Raw backward-difference angular acceleration, rad/s^2.
    pub raw_acceleration: f32,

    /// Low-pass filtered angular acceleration, rad/s^2.
    pub filtered_acceleration: f32,

    /// The 2-sample magnitude window behind the acceleration estimate.
    pub velocity_window: VelocityWindow,
}

/// Turns raw angular-velocity samples into a [`MotionState`].
#[derive(Debug, Clone)]
pub struct MotionEstimator {
    state: MotionState,
    velocity_filter: OneEuroFilterVec3,
    acceleration_filter: OneEuroFilter,
    /// Filter timestamp, accumulated from frame deltas.
    elapsed_secs: f64,
}

impl MotionEstimator {
    pub fn new() -> Self {
        Self {
            state: MotionState::default(),
            velocity_filter: OneEuroFilterVec3::for_headset(),
            acceleration_filter: OneEuroFilter::for_headset(),
            elapsed_secs: 0.0,
        }
    }

    /// Ingest one raw angular-velocity sample.
    ///
    /// `frame_dt` must be positive; the pipeline driver rejects the tick
    /// before this point otherwise.
    pub fn update(&mut self, angular_velocity: Vec3, frame_dt: f32) {
        debug_assert!(frame_dt > 0.0, "frame_dt must be validated by the caller");
        self.elapsed_secs += frame_dt as f64;

        let magnitude = angular_velocity.length();
        self.state.velocity_window.push(magnitude);

        self.state.filtered_velocity = self
            .velocity_filter
            .filter(self.elapsed_secs, angular_velocity);
        self.state.raw_velocity = magnitude;

        // A single magnitude gives no finite difference; keep the previous
        // acceleration estimate until the window fills.
        if self.state.velocity_window.is_full() {
            let raw_acceleration = self.state.velocity_window.delta() / frame_dt;
            self.state.filtered_acceleration = self
                .acceleration_filter
                .filter(self.elapsed_secs, raw_acceleration);
            self.state.raw_acceleration = raw_acceleration;
        }
    }

    /// The current motion estimate.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Drop all history and filter state.
    pub fn reset(&mut self) {
        self.state = MotionState::default();
        self.velocity_filter.reset();
        self.acceleration_filter.reset();
    }
}

impl Default for MotionEstimator {
    fn default() -> Self {
        Self::new()
    }
}
