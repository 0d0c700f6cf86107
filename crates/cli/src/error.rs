use std::path::PathBuf;

use vidaio_analyzer::AnalyzerError;
use vidaio_core::error::CoreError;
use vidaio_core::ffmpeg::FfmpegError;

use crate::config::ConfigError;

/// Top-level error for a `vidaio` run.
///
/// Every stage reports through here so `main` has a single place that maps
/// failures to a diagnostic and an exit code.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("cannot compute sampling plan: {0}")]
    Probe(#[source] FfmpegError),

    #[error("cannot compute sampling plan: {0}")]
    SamplingPlan(#[source] CoreError),

    #[error("frame extraction failed: {0}")]
    Extraction(#[source] FfmpegError),

    #[error("failed to prepare working directory: {0}")]
    WorkDir(#[source] CoreError),

    #[error(transparent)]
    Analysis(#[from] AnalyzerError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to render result: {0}")]
    Render(#[from] serde_json::Error),
}

/// Convenience type alias for pipeline return values.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Process exit code for this failure.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 1    | Other I/O or rendering failure       |
    /// | 2    | Input file not found                 |
    /// | 3    | Duration probe / sampling plan       |
    /// | 4    | Frame extraction could not run       |
    /// | 5    | Transport or API error               |
    /// | 6    | Malformed model response             |
    /// | 7    | Configuration error                  |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotFound(_) => 2,
            Self::Probe(_) | Self::SamplingPlan(_) => 3,
            Self::Extraction(_) => 4,
            Self::Analysis(AnalyzerError::Transport(_)) => 5,
            Self::Analysis(AnalyzerError::MalformedResponse { .. }) => 6,
            Self::Config(_) => 7,
            Self::Analysis(AnalyzerError::Frames(_) | AnalyzerError::ReadFrame { .. })
            | Self::WorkDir(_)
            | Self::Render(_) => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
