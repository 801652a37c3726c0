//! Per-tick amplification pipeline.
//!
//! Owns all cross-tick state: the motion estimator (and its filters), the
//! cursor ray, and the previous head pose. One full pass runs synchronously
//! per frame; nothing suspends mid-pipeline, and independent instances
//! share no state.

use gazeshift_common::error::{GazeShiftError, GazeShiftResult};
use gazeshift_pose_model::pose::HeadPoseSample;
use gazeshift_pose_model::ray::{elevation_deg, Ray};
use gazeshift_pose_model::TransferParams;

use crate::bounds::BoundClamp;
use crate::gain::{GainEngine, GainResult};
use crate::motion::MotionEstimator;
use crate::rotation::amplify_rotation;

/// Cross-tick cursor state.
#[derive(Debug, Clone, Copy)]
struct CursorState {
    /// The currently published cursor ray.
    ray: Ray,
    /// Head position at the previous tick.
    previous_position: glam::Vec3,
    /// Head rotation at the previous tick.
    previous_rotation: glam::Quat,
}

/// The head-rotation amplification pipeline.
///
/// Feed one [`HeadPoseSample`] per tick to [`tick`](Self::tick) and
/// publish the returned ray. [`recenter`](Self::recenter) snaps the
/// cursor back to the forward gaze.
#[derive(Debug, Clone)]
pub struct AmplifyPipeline {
    motion: MotionEstimator,
    gain_engine: GainEngine,
    clamp: BoundClamp,
    cursor: CursorState,
    /// Held across ticks where the velocity device is unavailable.
    last_gain: GainResult,
}

impl AmplifyPipeline {
    /// Create a pipeline whose cursor starts on the given pose's forward ray.
    pub fn new(params: TransferParams, initial: &HeadPoseSample) -> Self {
        let clamp = BoundClamp::new(params.bound_half_angle_deg);
        Self {
            motion: MotionEstimator::new(),
            gain_engine: GainEngine::new(params),
            clamp,
            cursor: CursorState {
                ray: Ray::forward_of(initial.position, initial.rotation),
                previous_position: initial.position,
                previous_rotation: initial.rotation,
            },
            last_gain: GainResult::neutral(),
        }
    }

    /// Run one full pipeline pass and return the published ray.
    ///
    /// When the sample carries no angular velocity (headset input device
    /// not yet detected), the motion estimate is left untouched and the
    /// last-known gain applies to the pose's rotation delta.
    pub fn tick(&mut self, sample: &HeadPoseSample) -> GazeShiftResult<Ray> {
        if sample.frame_dt <= 0.0 {
            return Err(GazeShiftError::InvalidFrameTiming {
                frame_dt: sample.frame_dt,
            });
        }

        let forward = sample.forward();

        if let Some(angular_velocity) = sample.angular_velocity {
            self.motion.update(angular_velocity, sample.frame_dt);

            let vertical_angle_deg =
                self.cursor.ray.elevation_deg() - elevation_deg(forward);
            self.last_gain = self.gain_engine.evaluate(self.motion.state(), vertical_angle_deg);
        }

        // The rotation the head executed this tick.
        let delta = sample.rotation * self.cursor.previous_rotation.inverse();
        let offset = amplify_rotation(delta, self.last_gain.gain);

        let offsetted = offset * self.cursor.ray.direction;
        let clamped = self.clamp.clamp(offsetted, forward);

        // Ray origin deliberately lags one tick behind the head position.
        let ray = Ray::new(self.cursor.previous_position, clamped);

        self.cursor.ray = ray;
        self.cursor.previous_position = sample.position;
        self.cursor.previous_rotation = sample.rotation;

        tracing::trace!(
            gain = self.last_gain.gain,
            mode = ?self.last_gain.mode,
            "pipeline tick"
        );

        Ok(ray)
    }

    /// Reset the cursor to the current forward gaze, bypassing the
    /// pipeline for this tick. Pose history is resynchronized so the next
    /// tick sees a zero rotation delta.
    pub fn recenter(&mut self, sample: &HeadPoseSample) -> Ray {
        let ray = Ray::forward_of(sample.position, sample.rotation);
        self.cursor.ray = ray;
        self.cursor.previous_position = sample.position;
        self.cursor.previous_rotation = sample.rotation;
        tracing::debug!("cursor recentered");
        ray
    }

    /// The currently published cursor ray.
    pub fn cursor_ray(&self) -> Ray {
        self.cursor.ray
    }

    /// The most recently computed (or held) gain.
    pub fn last_gain(&self) -> &GainResult {
        &self.last_gain
    }

    /// The pipeline's tunable parameters.
    pub fn params(&self) -> &TransferParams {
        self.gain_engine.params()
    }
}
