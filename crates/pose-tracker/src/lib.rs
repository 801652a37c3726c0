//! GazeShift Pose Tracker
//!
//! Drives the amplification pipeline from a pluggable pose backend:
//! one pose sample in, one cursor ray out, every tick. Responsibilities:
//!
//! - **Backend abstraction:** anything that can produce head poses
//!   (a headset runtime, a replayed session, a synthetic script)
//! - **Device degradation:** samples may arrive without angular velocity
//!   while the headset input device is undetected; discovery is retried
//!   every tick
//! - **Recenter handling:** a flag set by the embedder (key press) snaps
//!   the cursor back to the forward gaze on the next tick
//! - **Session recording:** published rays are appended to a JSONL log

pub mod backends;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gazeshift_amplify_core::AmplifyPipeline;
use gazeshift_common::clock::{SessionClock, TickController};
use gazeshift_common::error::GazeShiftResult;
use gazeshift_pose_model::{HeadPoseSample, Ray, TransferParams};

/// Trait for head pose backends.
pub trait PoseBackend: Send {
    /// Poll for this tick's pose sample. Returns `None` if no sample is
    /// available yet (device still warming up) or the stream has ended.
    fn sample(&mut self) -> GazeShiftResult<Option<HeadPoseSample>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Check if the backend is available on this system.
    fn is_available(&self) -> bool;
}

/// The gaze tracker that coordinates a backend with the pipeline and
/// optional session recording.
pub struct GazeTracker {
    backend: Box<dyn PoseBackend>,
    params: TransferParams,
    /// Created on the first sample; the cursor starts on that pose's
    /// forward ray.
    pipeline: Option<AmplifyPipeline>,
    writer: Option<writer::RayWriter>,
    clock: SessionClock,
    stop_flag: Arc<AtomicBool>,
    recenter_flag: Arc<AtomicBool>,
    velocity_device_seen: bool,
    ticks: u64,
}

impl GazeTracker {
    /// Create a new tracker. `writer` is optional session recording.
    pub fn new(
        backend: Box<dyn PoseBackend>,
        params: TransferParams,
        writer: Option<writer::RayWriter>,
    ) -> Self {
        Self {
            backend,
            params,
            pipeline: None,
            writer,
            clock: SessionClock::start(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            recenter_flag: Arc::new(AtomicBool::new(false)),
            velocity_device_seen: false,
            ticks: 0,
        }
    }

    /// Run the tick loop until the stop flag is set or the backend's
    /// sample stream ends.
    pub async fn run(&mut self, tick_rate_hz: u32) -> GazeShiftResult<u64> {
        tracing::info!(backend = %self.backend.name(), tick_rate_hz, "Gaze tracker started");

        let mut ticker = TickController::new(tick_rate_hz);
        let poll_interval = std::time::Duration::from_secs_f64(ticker.interval_secs() / 4.0);

        while !self.stop_flag.load(Ordering::Relaxed) {
            if !ticker.should_tick(self.clock.elapsed_secs()) {
                tokio::time::sleep(poll_interval).await;
                continue;
            }
            match self.backend.sample() {
                Ok(Some(sample)) => {
                    self.process_sample(&sample)?;
                }
                Ok(None) => {
                    if self.pipeline.is_some() {
                        // A started stream that stops producing has ended
                        break;
                    }
                    // Device not ready yet; discovery is cheap, retry next tick
                    tracing::debug!(
                        available = self.backend.is_available(),
                        "Waiting for pose device"
                    );
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "Pose backend error");
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(writer) = &mut self.writer {
            writer.flush()?;
        }
        tracing::info!(ticks = self.ticks, "Gaze tracker stopped");
        Ok(self.ticks)
    }

    /// Run one tick against a sample and return the published ray.
    pub fn process_sample(&mut self, sample: &HeadPoseSample) -> GazeShiftResult<Ray> {
        let pipeline = self
            .pipeline
            .get_or_insert_with(|| AmplifyPipeline::new(self.params, sample));

        if sample.has_velocity() && !self.velocity_device_seen {
            self.velocity_device_seen = true;
            tracing::info!("Headset velocity device detected");
        }

        let ray = if self.recenter_flag.swap(false, Ordering::SeqCst) {
            pipeline.recenter(sample)
        } else {
            pipeline.tick(sample)?
        };

        self.ticks += 1;

        if let Some(writer) = &mut self.writer {
            let result = pipeline.last_gain();
            writer.write_ray(self.clock.elapsed_secs(), ray, result.gain, result.mode)?;
        }

        Ok(ray)
    }

    /// The currently published cursor ray, if any tick has run.
    pub fn cursor_ray(&self) -> Option<Ray> {
        self.pipeline.as_ref().map(|p| p.cursor_ray())
    }

    /// Request a cursor recenter on the next tick.
    pub fn request_recenter(&self) {
        self.recenter_flag.store(true, Ordering::SeqCst);
    }

    /// Get the recenter flag for external coordination (key handler).
    pub fn recenter_flag(&self) -> Arc<AtomicBool> {
        self.recenter_flag.clone()
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::SyntheticBackend;
    use glam::Vec3;

    #[test]
    fn test_tracker_processes_synthetic_stream() {
        let backend = SyntheticBackend::slow_sweep(30);
        let mut tracker = GazeTracker::new(Box::new(backend), TransferParams::default(), None);

        let mut count = 0;
        while let Some(sample) = tracker_next(&mut tracker) {
            tracker.process_sample(&sample).unwrap();
            count += 1;
        }

        assert_eq!(count, 30);
        assert_eq!(tracker.ticks(), 30);
        assert!(tracker.cursor_ray().is_some());
    }

    #[test]
    fn test_recenter_flag_consumed_once() {
        let backend = SyntheticBackend::slow_sweep(10);
        let mut tracker = GazeTracker::new(Box::new(backend), TransferParams::default(), None);

        let first = tracker_next(&mut tracker).unwrap();
        tracker.process_sample(&first).unwrap();

        tracker.request_recenter();
        let second = tracker_next(&mut tracker).unwrap();
        let ray = tracker.process_sample(&second).unwrap();

        // Recentered: ray sits on the sample's own forward ray
        assert_eq!(ray.origin, second.position);
        assert!((ray.direction - second.forward()).length() < 1e-5);
        assert!(!tracker.recenter_flag().load(Ordering::SeqCst));
    }

    #[test]
    fn test_late_velocity_device_keeps_cursor_tracking() {
        // Velocity readings only appear from tick 5 onward
        let backend = SyntheticBackend::slow_sweep(20).with_velocity_from_tick(5);
        let mut tracker = GazeTracker::new(Box::new(backend), TransferParams::default(), None);

        let mut last_forward = Vec3::NEG_Z;
        while let Some(sample) = tracker_next(&mut tracker) {
            tracker.process_sample(&sample).unwrap();
            last_forward = sample.forward();
        }

        // Cursor survived the unavailable window and still points near
        // the head's forward cone
        let ray = tracker.cursor_ray().unwrap();
        assert!(ray.direction.angle_between(last_forward).to_degrees() <= 15.01);
    }

    fn tracker_next(tracker: &mut GazeTracker) -> Option<HeadPoseSample> {
        tracker.backend.sample().unwrap()
    }

    #[tokio::test]
    async fn test_run_paces_ticks_and_stops_at_stream_end() {
        let backend = SyntheticBackend::slow_sweep(5);
        let mut tracker = GazeTracker::new(Box::new(backend), TransferParams::default(), None);

        // High tick rate keeps the paced loop short; the run must consume
        // every scripted sample and stop when the stream ends.
        let processed = tracker.run(900).await.unwrap();
        assert_eq!(processed, 5);
        assert!(tracker.cursor_ray().is_some());
    }
}
