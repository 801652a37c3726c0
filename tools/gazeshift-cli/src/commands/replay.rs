//! Replay a recorded pose stream through the pipeline.

use std::path::PathBuf;

use gazeshift_amplify_core::AmplifyPipeline;
use gazeshift_common::clock::{FrameTimer, SessionClock};
use gazeshift_pose_model::stream::{parse_pose_stream, StreamHeader};
use gazeshift_pose_model::{GainMode, TransferParams};
use gazeshift_pose_tracker::writer::RayWriter;

pub fn run(path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    println!("Replaying pose stream: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .map_err(|_| anyhow::anyhow!("Pose stream not found: {}", path.display()))?;
    let records =
        parse_pose_stream(&content).map_err(|e| anyhow::anyhow!("Failed to parse stream: {e}"))?;

    println!("  Loaded {} pose records", records.len());

    let Some(first) = records.first() else {
        println!("  Nothing to replay.");
        return Ok(());
    };

    let mut writer = match &output {
        Some(out) => {
            let header = StreamHeader::new(
                SessionClock::start().epoch_wall(),
                derive_tick_rate(&records),
            );
            Some(
                RayWriter::new(out.clone(), header)
                    .map_err(|e| anyhow::anyhow!("Failed to open output: {e}"))?,
            )
        }
        None => None,
    };

    let mut pipeline = AmplifyPipeline::new(TransferParams::default(), &first.sample);
    let mut timer = FrameTimer::new();

    let mut ballistic_ticks = 0u64;
    let mut max_gain = 0.0f32;
    let mut gain_sum = 0.0f64;

    for record in &records {
        // A recorded stream with a stalled or backwards timestamp is
        // corrupt; refuse it rather than feed the pipeline bad deltas.
        timer
            .tick(record.t_secs)
            .map_err(|e| anyhow::anyhow!("Rejecting pose stream: {e}"))?;

        let ray = pipeline
            .tick(&record.sample)
            .map_err(|e| anyhow::anyhow!("Tick at t={} failed: {e}", record.t_secs))?;

        let result = pipeline.last_gain();
        if result.mode == GainMode::Ballistic {
            ballistic_ticks += 1;
        }
        max_gain = max_gain.max(result.gain);
        gain_sum += result.gain as f64;

        if let Some(writer) = &mut writer {
            writer
                .write_ray(record.t_secs, ray, result.gain, result.mode)
                .map_err(|e| anyhow::anyhow!("Failed to write ray: {e}"))?;
        }
    }

    let ticks = records.len() as u64;
    println!("  Ticks: {ticks}");
    println!(
        "  Ballistic: {ballistic_ticks} ({:.1}%)",
        100.0 * ballistic_ticks as f64 / ticks as f64
    );
    println!("  Mean gain: {:.3}", gain_sum / ticks as f64);
    println!("  Max gain: {max_gain:.3}");

    if let Some(out) = output {
        println!("  Ray stream written to {}", out.display());
    }

    Ok(())
}

/// Nominal tick rate of a recorded stream, from the mean frame delta.
fn derive_tick_rate(records: &[gazeshift_pose_model::stream::PoseRecord]) -> u32 {
    let mean_dt = records
        .iter()
        .map(|r| r.sample.frame_dt as f64)
        .sum::<f64>()
        / records.len() as f64;
    if mean_dt > 0.0 {
        (1.0 / mean_dt).round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazeshift_pose_model::stream::{parse_ray_stream, serialize_pose_stream, PoseRecord};
    use gazeshift_pose_model::HeadPoseSample;
    use glam::{Quat, Vec3};

    const DT: f32 = 1.0 / 90.0;

    fn pose_records(n: usize) -> Vec<PoseRecord> {
        (0..n)
            .map(|i| PoseRecord {
                t_secs: i as f64 * DT as f64,
                sample: HeadPoseSample::new(
                    Quat::from_rotation_y(0.001 * i as f32),
                    Vec3::new(0.0, 1.6, 0.0),
                    Vec3::new(0.0, 0.09, 0.0),
                    DT,
                ),
            })
            .collect()
    }

    fn write_stream(dir: &std::path::Path, records: &[PoseRecord]) -> PathBuf {
        let path = dir.join("poses.jsonl");
        std::fs::write(&path, serialize_pose_stream(records).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_replay_header_carries_derived_tick_rate() {
        let dir = std::env::temp_dir().join("gazeshift_test_replay_rate");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let input = write_stream(&dir, &pose_records(10));
        let out = dir.join("rays.jsonl");
        run(input, Some(out.clone())).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let header_line = content.lines().next().unwrap().trim_start_matches("# ");
        let header: StreamHeader = serde_json::from_str(header_line).unwrap();
        assert_eq!(header.tick_rate_hz, 90);
        assert_eq!(parse_ray_stream(&content).unwrap().len(), 10);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_replay_rejects_non_monotonic_stream() {
        let dir = std::env::temp_dir().join("gazeshift_test_replay_clock");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let mut records = pose_records(3);
        records[2].t_secs = records[1].t_secs; // stalled clock
        let input = write_stream(&dir, &records);

        assert!(run(input, None).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
