//! Append-only ray stream writer for session recording.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gazeshift_common::error::GazeShiftResult;
use gazeshift_pose_model::stream::{RayRecord, StreamHeader};
use gazeshift_pose_model::{GainMode, Ray};

/// Records per flush batch: about ten seconds of session at the 90 Hz
/// tick rate, so a crash loses at most that much of the ray log.
const FLUSH_BATCH: u64 = 900;

/// Writes published cursor rays to a JSONL session log.
///
/// The first line is the stream header as a `#` comment; every tick
/// appends one [`RayRecord`] line.
pub struct RayWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records_written: u64,
}

impl RayWriter {
    /// Open the log at `path`, truncating any previous session, and
    /// write the header line.
    pub fn new(path: PathBuf, header: StreamHeader) -> GazeShiftResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "# {}", serde_json::to_string(&header)?)?;

        Ok(Self {
            writer,
            path,
            records_written: 0,
        })
    }

    /// Append one published ray with its session timestamp and gain.
    pub fn write_ray(
        &mut self,
        t_secs: f64,
        ray: Ray,
        gain: f32,
        mode: GainMode,
    ) -> GazeShiftResult<()> {
        self.write_record(&RayRecord::new(t_secs, ray, gain, mode))
    }

    /// Append a prebuilt record as a JSONL line.
    pub fn write_record(&mut self, record: &RayRecord) -> GazeShiftResult<()> {
        writeln!(self.writer, "{}", serde_json::to_string(record)?)?;
        self.records_written += 1;

        if self.records_written % FLUSH_BATCH == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered records to disk.
    pub fn flush(&mut self) -> GazeShiftResult<()> {
        Ok(self.writer.flush()?)
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Path of the session log.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RayWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazeshift_pose_model::stream::parse_ray_stream;
    use glam::Vec3;

    #[test]
    fn test_ray_writer_roundtrip() {
        let dir = std::env::temp_dir().join("gazeshift_test_writer");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("rays.jsonl");
        let header = StreamHeader::new("2026-01-01T00:00:00Z", 90);

        {
            let mut writer = RayWriter::new(path.clone(), header).unwrap();
            writer
                .write_ray(
                    0.0,
                    Ray::new(Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_Z),
                    0.58,
                    GainMode::Refinement,
                )
                .unwrap();
            writer
                .write_ray(
                    0.011,
                    Ray::new(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.1, 0.0, -1.0)),
                    4.8,
                    GainMode::Ballistic,
                )
                .unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.records_written(), 2);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# "));
        let parsed = parse_ray_stream(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].mode, GainMode::Refinement);
        assert_eq!(parsed[1].mode, GainMode::Ballistic);
        assert!((parsed[1].gain - 4.8).abs() < 1e-6);
        assert!((parsed[1].ray().direction.length() - 1.0).abs() < 1e-6);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
