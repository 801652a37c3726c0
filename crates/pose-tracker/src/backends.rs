//! Pose backend implementations.
//!
//! The synthetic backend generates a scripted head motion for simulation
//! and tests; real headset runtimes plug in through the same trait.

use gazeshift_common::error::GazeShiftResult;
use gazeshift_pose_model::HeadPoseSample;
use glam::{Quat, Vec3};

use crate::PoseBackend;

/// Scripted head motion: a sinusoidal yaw sweep at a fixed tick rate.
///
/// Optionally simulates late discovery of the headset's velocity device
/// by omitting angular velocity for the first N ticks.
pub struct SyntheticBackend {
    tick: u64,
    total_ticks: u64,
    dt: f32,
    /// Peak yaw rate of the sweep, rad/s.
    peak_yaw_rate: f32,
    /// Full sweep period, seconds.
    period_secs: f32,
    /// Ticks before angular velocity readings become available.
    velocity_from_tick: u64,
    rotation: Quat,
    position: Vec3,
}

impl SyntheticBackend {
    pub fn new(total_ticks: u64, tick_rate_hz: u32, peak_yaw_rate: f32, period_secs: f32) -> Self {
        Self {
            tick: 0,
            total_ticks,
            dt: 1.0 / tick_rate_hz.max(1) as f32,
            peak_yaw_rate,
            period_secs,
            velocity_from_tick: 0,
            rotation: Quat::IDENTITY,
            position: Vec3::new(0.0, 1.6, 0.0),
        }
    }

    /// A gentle sweep that stays below the refinement speed threshold.
    pub fn slow_sweep(total_ticks: u64) -> Self {
        Self::new(total_ticks, 90, 0.1, 4.0)
    }

    /// A vigorous sweep that drives the pipeline into ballistic mode.
    pub fn fast_sweep(total_ticks: u64) -> Self {
        Self::new(total_ticks, 90, 2.5, 2.0)
    }

    /// Omit angular velocity until the given tick.
    pub fn with_velocity_from_tick(mut self, tick: u64) -> Self {
        self.velocity_from_tick = tick;
        self
    }
}

impl PoseBackend for SyntheticBackend {
    fn sample(&mut self) -> GazeShiftResult<Option<HeadPoseSample>> {
        if self.tick >= self.total_ticks {
            return Ok(None);
        }

        let t = self.tick as f32 * self.dt;
        let yaw_rate =
            self.peak_yaw_rate * (std::f32::consts::TAU * t / self.period_secs).sin();
        self.rotation = Quat::from_rotation_y(yaw_rate * self.dt) * self.rotation;

        let sample = if self.tick >= self.velocity_from_tick {
            HeadPoseSample::new(
                self.rotation,
                self.position,
                Vec3::new(0.0, yaw_rate, 0.0),
                self.dt,
            )
        } else {
            HeadPoseSample::without_velocity(self.rotation, self.position, self.dt)
        };

        self.tick += 1;
        Ok(Some(sample))
    }

    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_available(&self) -> bool {
        true
    }
}
