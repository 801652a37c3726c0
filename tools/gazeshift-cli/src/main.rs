//! GazeShift CLI: command-line interface for head-pointing sessions.
//!
//! Usage:
//!   gazeshift simulate [OPTIONS]    Run the pipeline over a synthetic motion script
//!   gazeshift replay <PATH>         Run the pipeline over a recorded pose stream
//!   gazeshift defaults              Print the default configuration as JSON

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gazeshift",
    about = "Amplified head-gaze pointing for VR",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the amplification pipeline over a synthetic motion script
    Simulate {
        /// Number of ticks to simulate
        #[arg(long, default_value = "900")]
        ticks: u64,

        /// Tick rate (Hz)
        #[arg(long, default_value = "90")]
        tick_rate: u32,

        /// Use the fast sweep script (drives ballistic mode)
        #[arg(long)]
        fast: bool,

        /// Write the published ray stream to this JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bounding-cone half-angle in degrees
        #[arg(long, default_value = "15.0")]
        bound: f32,
    },

    /// Run the pipeline over a recorded pose stream and report statistics
    Replay {
        /// Path to a pose stream JSONL file
        path: PathBuf,

        /// Write the resulting ray stream to this JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the transfer parameters and effective app config as JSON
    Defaults,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    gazeshift_common::logging::init_logging(&gazeshift_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Simulate {
            ticks,
            tick_rate,
            fast,
            output,
            bound,
        } => commands::simulate::run(ticks, tick_rate, fast, output, bound).await,
        Commands::Replay { path, output } => commands::replay::run(path, output),
        Commands::Defaults => {
            let params = gazeshift_pose_model::TransferParams::default();
            let config = gazeshift_common::config::AppConfig::load();
            println!("{}", serde_json::to_string_pretty(&params)?);
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
