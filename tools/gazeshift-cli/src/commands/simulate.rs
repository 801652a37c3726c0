//! Run the pipeline over a synthetic motion script.

use std::path::PathBuf;

use gazeshift_common::clock::SessionClock;
use gazeshift_pose_model::stream::StreamHeader;
use gazeshift_pose_model::TransferParams;
use gazeshift_pose_tracker::backends::SyntheticBackend;
use gazeshift_pose_tracker::writer::RayWriter;
use gazeshift_pose_tracker::GazeTracker;

pub async fn run(
    ticks: u64,
    tick_rate: u32,
    fast: bool,
    output: Option<PathBuf>,
    bound: f32,
) -> anyhow::Result<()> {
    let script = if fast { "fast sweep" } else { "slow sweep" };
    println!("Simulating {ticks} ticks at {tick_rate} Hz ({script})");

    let backend = if fast {
        SyntheticBackend::fast_sweep(ticks)
    } else {
        SyntheticBackend::slow_sweep(ticks)
    };

    let params = TransferParams {
        bound_half_angle_deg: bound,
        ..Default::default()
    };

    let writer = match &output {
        Some(path) => {
            let clock = SessionClock::start();
            let header = StreamHeader::new(clock.epoch_wall(), tick_rate);
            Some(
                RayWriter::new(path.clone(), header)
                    .map_err(|e| anyhow::anyhow!("Failed to open output: {e}"))?,
            )
        }
        None => None,
    };

    let mut tracker = GazeTracker::new(Box::new(backend), params, writer);
    let processed = tracker
        .run(tick_rate)
        .await
        .map_err(|e| anyhow::anyhow!("Simulation failed: {e}"))?;

    println!("  Processed {processed} ticks");
    if let Some(ray) = tracker.cursor_ray() {
        println!(
            "  Final cursor direction: ({:.4}, {:.4}, {:.4})",
            ray.direction.x, ray.direction.y, ray.direction.z
        );
    }
    if let Some(path) = output {
        println!("  Ray stream written to {}", path.display());
    }

    Ok(())
}
