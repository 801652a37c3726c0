//! GazeShift Amplification Core
//!
//! Turns per-tick head pose samples into an amplified gaze-cursor ray:
//! - **Motion estimation:** filtered angular velocity/acceleration from raw samples
//! - **Gain transfer:** two-branch sigmoid with directional correction
//! - **Rotation accumulation:** fractional amplification of the head's rotation delta
//! - **Bound clamping:** keeps the cursor inside a cone around the forward gaze
//!
//! This crate is pure computation: no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod bounds;
pub mod filter;
pub mod gain;
pub mod motion;
pub mod pipeline;
pub mod rotation;

pub use gain::{GainEngine, GainResult};
pub use motion::MotionEstimator;
pub use pipeline::AmplifyPipeline;
