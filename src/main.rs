//! gaitview CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gaitview::trial::TrialDataset;

#[derive(Parser)]
#[command(name = "gaitview", version, about = "Playback viewer for gait simulation trials")]
struct Cli {
    /// Enable debug logging (or set GAITVIEW_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a trial dataset interactively
    Play {
        /// Path to the trial JSON file
        trial: PathBuf,
    },
    /// Print a summary of a trial dataset and validate it
    Info {
        /// Path to the trial JSON file
        trial: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("GAITVIEW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_info(trial: &Path) -> Result<()> {
    let dataset = TrialDataset::load(trial)?;

    println!("name:            {}", dataset.name);
    println!("frames:          {}", dataset.frame_count());
    println!("steps per cycle: {}", dataset.time.steps_per_cycle);
    println!("scale:           {}", dataset.scale);
    println!("markers:         {}", dataset.marker_ids.join(", "));

    let last = dataset.frame(dataset.frame_count() - 1);
    println!("duration:        {:.2} cycles", last.time);

    if !dataset.cycles.is_empty() {
        println!("cycle segments:");
        for (marker_id, segments) in &dataset.cycles {
            println!("  {:<12} {} segments", marker_id, segments.len());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Play { trial } => {
            gaitview::play_trial(&trial)?;
            Ok(())
        }
        Command::Info { trial } => print_info(&trial),
    }
}
