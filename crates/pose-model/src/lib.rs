//! GazeShift Pose Model
//!
//! Pure data types shared by the amplification core and the device glue:
//! head pose samples, cursor rays, transfer-function parameters, and the
//! JSONL session stream schema. No I/O, no platform dependencies.

pub mod params;
pub mod pose;
pub mod ray;
pub mod stream;

pub use params::{GainMode, SigmoidParams, TransferParams};
pub use pose::HeadPoseSample;
pub use ray::Ray;
