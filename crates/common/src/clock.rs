//! Frame clock and tick timing utilities.
//!
//! The amplification pipeline is tick-driven: every rendering frame the
//! tracker derives a frame delta from a monotonic session clock and feeds
//! it to the pipeline. This module provides:
//! - The session clock (monotonic epoch + wall-clock anchor)
//! - Frame-delta derivation with the non-positive-delta guard
//! - A tick rate controller for simulation loops

use std::time::Instant;

use crate::error::{GazeShiftError, GazeShiftResult};

/// A session clock anchored to a fixed monotonic epoch (the moment the
/// tracking session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

/// Derives per-tick frame deltas from successive clock readings.
///
/// Rejects non-monotonic readings instead of letting a zero or negative
/// delta reach the acceleration estimator.
#[derive(Debug, Default)]
pub struct FrameTimer {
    last_tick_secs: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tick at `now_secs` (seconds since session epoch) and
    /// return the delta since the previous tick.
    ///
    /// The first tick has no predecessor and returns `None`. A reading at
    /// or before the previous one is a fatal [`GazeShiftError::InvalidFrameTiming`].
    pub fn tick(&mut self, now_secs: f64) -> GazeShiftResult<Option<f32>> {
        let delta = match self.last_tick_secs {
            None => None,
            Some(last) => {
                let dt = (now_secs - last) as f32;
                if dt <= 0.0 {
                    return Err(GazeShiftError::InvalidFrameTiming { frame_dt: dt });
                }
                Some(dt)
            }
        };
        self.last_tick_secs = Some(now_secs);
        Ok(delta)
    }

    /// Forget the previous reading (e.g., after the frame loop was paused).
    pub fn reset(&mut self) {
        self.last_tick_secs = None;
    }
}

/// Tick rate controller for simulation loops.
#[derive(Debug)]
pub struct TickController {
    target_interval_secs: f64,
    last_tick_secs: Option<f64>,
}

impl TickController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_secs: 1.0 / target_hz.max(1) as f64,
            last_tick_secs: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, now_secs: f64) -> bool {
        match self.last_tick_secs {
            None => {
                self.last_tick_secs = Some(now_secs);
                true
            }
            Some(last) if now_secs >= last + self.target_interval_secs => {
                self.last_tick_secs = Some(now_secs);
                true
            }
            _ => false,
        }
    }

    /// Target interval in seconds.
    pub fn interval_secs(&self) -> f64 {
        self.target_interval_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed_secs() < 1.0);
    }

    #[test]
    fn test_frame_timer_first_tick_has_no_delta() {
        let mut timer = FrameTimer::new();
        assert!(timer.tick(0.0).unwrap().is_none());
        let dt = timer.tick(0.011).unwrap().unwrap();
        assert!((dt - 0.011).abs() < 1e-6);
    }

    #[test]
    fn test_frame_timer_rejects_backwards_clock() {
        let mut timer = FrameTimer::new();
        timer.tick(1.0).unwrap();
        let err = timer.tick(1.0).unwrap_err();
        assert!(matches!(err, GazeShiftError::InvalidFrameTiming { .. }));
    }

    #[test]
    fn test_tick_controller() {
        let mut ctrl = TickController::new(90);
        assert!(ctrl.should_tick(0.0)); // first tick always fires
        assert!(!ctrl.should_tick(0.001)); // 1ms later, too soon
        assert!(ctrl.should_tick(0.012)); // ~12ms later, should fire (90Hz ~ 11.1ms)
    }
}
