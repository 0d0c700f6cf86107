use std::path::PathBuf;

use clap::Parser;
use vidaio_core::sampling::DEFAULT_PRECISION;

/// Default scratch directory for extracted frames.
pub const DEFAULT_OUTPUT_DIR: &str = "frames";

#[derive(Debug, Parser)]
#[command(name = "vidaio")]
#[command(about = "Sample frames from a video and ask a vision model for a security verdict")]
#[command(version)]
pub struct Cli {
    /// Path to the input file
    #[arg(value_parser = existing_file)]
    pub filepath: PathBuf,

    /// How many frames within the total video should be processed
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRECISION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub precision: u32,

    /// Output directory for frames (removed when the run ends)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Print diagnostics (duration, interval, frame count, cleanup) to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File does not exist: {value}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
