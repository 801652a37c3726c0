//! Session stream schema.
//!
//! Recorded pointing sessions are append-only JSONL files: a header line
//! (prefixed with `#`) followed by one record per tick. Pose streams hold
//! the raw input side; ray streams hold the published output side.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::params::GainMode;
use crate::pose::HeadPoseSample;
use crate::ray::Ray;

/// Header written as the first (comment) line of a session stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (ISO 8601).
    pub epoch_wall: String,

    /// Target tick rate of the loop that produced the stream (Hz).
    pub tick_rate_hz: u32,
}

impl StreamHeader {
    pub fn new(epoch_wall: impl Into<String>, tick_rate_hz: u32) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            epoch_wall: epoch_wall.into(),
            tick_rate_hz,
        }
    }
}

/// One recorded input sample with its session timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    /// Seconds since session start.
    #[serde(rename = "t")]
    pub t_secs: f64,

    /// The pose sample captured at this tick.
    #[serde(flatten)]
    pub sample: HeadPoseSample,
}

/// One published cursor ray with the gain that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayRecord {
    /// Seconds since session start.
    #[serde(rename = "t")]
    pub t_secs: f64,

    /// Ray origin.
    pub origin: Vec3,

    /// Unit ray direction.
    pub direction: Vec3,

    /// Gain applied this tick.
    pub gain: f32,

    /// Which curve produced the gain.
    pub mode: GainMode,
}

impl RayRecord {
    pub fn new(t_secs: f64, ray: Ray, gain: f32, mode: GainMode) -> Self {
        Self {
            t_secs,
            origin: ray.origin,
            direction: ray.direction,
            gain,
            mode,
        }
    }

    /// The recorded ray.
    pub fn ray(&self) -> Ray {
        Ray::new(self.origin, self.direction)
    }
}

/// Parse pose records from JSONL content, skipping the header comment.
pub fn parse_pose_stream(jsonl: &str) -> Result<Vec<PoseRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse ray records from JSONL content, skipping the header comment.
pub fn parse_ray_stream(jsonl: &str) -> Result<Vec<RayRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize records to JSONL format.
pub fn serialize_pose_stream(records: &[PoseRecord]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}
