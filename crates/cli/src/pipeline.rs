//! Probe → sample → analyze, with the frame directory always cleaned up.

use std::path::{Path, PathBuf};

use vidaio_analyzer::{AnalysisResult, InferenceClient, VisionAnalyzer};
use vidaio_core::ffmpeg::{self, FfmpegError, MediaTools};
use vidaio_core::frames::{WorkDir, MAX_ORDERED_FRAMES};
use vidaio_core::sampling::SamplingPlan;

use crate::args::Cli;
use crate::error::{PipelineError, PipelineResult};

/// Inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub precision: u32,
    pub output_dir: PathBuf,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            input: cli.filepath.clone(),
            precision: cli.precision,
            output_dir: cli.output.clone(),
        }
    }
}

/// Fail with [`PipelineError::InputNotFound`] unless `path` is a file.
pub fn ensure_input(path: &Path) -> PipelineResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PipelineError::InputNotFound(path.to_path_buf()))
    }
}

/// Run the whole pipeline and return the verdict.
///
/// No external tool is started if the input does not exist, and a failed
/// duration probe stops the run before any extraction. Once the working
/// directory exists it is removed on every path out of this function.
pub async fn run<C: InferenceClient>(
    opts: &RunOptions,
    tools: &MediaTools,
    analyzer: &VisionAnalyzer<C>,
) -> PipelineResult<AnalysisResult> {
    ensure_input(&opts.input)?;

    tracing::info!(
        file = %opts.input.display(),
        precision = opts.precision,
        "Processing file",
    );

    let duration_secs = ffmpeg::probe_duration(tools, &opts.input)
        .await
        .map_err(PipelineError::Probe)?;
    let plan = SamplingPlan::new(duration_secs, opts.precision).map_err(PipelineError::SamplingPlan)?;

    tracing::info!(
        duration_secs,
        interval_secs = plan.interval_secs,
        "Sampling plan computed",
    );

    let work = WorkDir::create(&opts.output_dir)
        .await
        .map_err(PipelineError::WorkDir)?;

    let outcome = sample_and_analyze(opts, tools, analyzer, &plan, &work).await;
    work.close().await;
    outcome
}

async fn sample_and_analyze<C: InferenceClient>(
    opts: &RunOptions,
    tools: &MediaTools,
    analyzer: &VisionAnalyzer<C>,
    plan: &SamplingPlan,
    work: &WorkDir,
) -> PipelineResult<AnalysisResult> {
    match ffmpeg::extract_frames(tools, &opts.input, plan.interval_secs, work.path()).await {
        Ok(report) => {
            tracing::info!(
                frame_count = report.frame_count,
                out_dir = %report.out_dir.display(),
                "Frames saved",
            );
            if report.frame_count > MAX_ORDERED_FRAMES as usize {
                tracing::warn!(
                    frame_count = report.frame_count,
                    max = MAX_ORDERED_FRAMES,
                    "Frame names exceed four digits; request order may not match playback",
                );
            }
        }
        // ffmpeg ran but failed; analyze whatever frames it left behind.
        Err(FfmpegError::ExecutionFailed { exit_code, stderr }) => {
            tracing::warn!(
                exit_code = ?exit_code,
                stderr = %stderr.trim(),
                "ffmpeg failed; continuing with partial frames",
            );
        }
        Err(e) => return Err(PipelineError::Extraction(e)),
    }

    let result = analyzer.analyze(work.path()).await?;
    tracing::info!(
        threat_level = result.threat_level,
        band = result.threat().as_str(),
        hazards = result.any_hazard(),
        "Analysis complete",
    );
    Ok(result)
}
