//! `vidaio` -- sample frames from a video and ask a vision model for a
//! security verdict.
//!
//! Prints the verdict as pretty JSON followed by `Completed` on stdout.
//! Diagnostics go to stderr (`--verbose` or `RUST_LOG`).
//!
//! # Environment variables
//!
//! | Variable                      | Required | Default                     |
//! |-------------------------------|----------|-----------------------------|
//! | `ANTHROPIC_API_KEY`           | yes      | --                          |
//! | `ANTHROPIC_BASE_URL`          | no       | `https://api.anthropic.com` |
//! | `VIDAIO_MODEL`                | no       | `claude-sonnet-4-5`         |
//! | `VIDAIO_MAX_TOKENS`           | no       | `1000`                      |
//! | `VIDAIO_TEMPERATURE`          | no       | `0.3`                       |
//! | `VIDAIO_REQUEST_TIMEOUT_SECS` | no       | --                          |
//! | `FFPROBE_PATH`                | no       | `ffprobe`                   |
//! | `FFMPEG_PATH`                 | no       | `ffmpeg`                    |

use std::process::ExitCode;

use clap::Parser;
use vidaio::args::Cli;
use vidaio::config::{self, AnalyzerConfig};
use vidaio::error::PipelineResult;
use vidaio::logging;
use vidaio::pipeline::{self, RunOptions};
use vidaio_analyzer::{AnalyzerError, VisionAnalyzer};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "vidaio failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> PipelineResult<()> {
    let opts = RunOptions::from(cli);
    pipeline::ensure_input(&opts.input)?;

    let tools = config::media_tools_from_env();
    let config = AnalyzerConfig::from_env()?;
    let client = config.build_client().map_err(AnalyzerError::from)?;
    let analyzer = VisionAnalyzer::new(client, config.settings);

    let result = pipeline::run(&opts, &tools, &analyzer).await?;

    println!("{}", result.to_pretty_json()?);
    println!("Completed");
    Ok(())
}
