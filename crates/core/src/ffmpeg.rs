//! FFmpeg/FFprobe command wrappers.
//!
//! Two invocations are needed: `ffprobe` for the container duration and
//! `ffmpeg` to write evenly spaced JPEG frames into a directory.

use std::path::{Path, PathBuf};

use crate::frames::{self, FRAME_PATTERN};
use crate::sampling;

/// `-q:v` value passed to ffmpeg (2 is near-lossless JPEG).
pub const JPEG_QUALITY: u8 = 2;

/// Error type for FFmpeg/FFprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffprobe/ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe/ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("video file not found: {0}")]
    VideoNotFound(String),

    #[error("frame interval must be at least one second, got {0}")]
    InvalidInterval(u64),
}

/// Locations of the external media binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTools {
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Default for MediaTools {
    fn default() -> Self {
        Self {
            ffprobe: PathBuf::from("ffprobe"),
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

/// Result of a frame extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of JPEG files present in `out_dir` after ffmpeg exited.
    pub frame_count: usize,
    pub out_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Ask `ffprobe` for the container-level duration of `path`, in seconds.
pub async fn probe_duration(tools: &MediaTools, path: &Path) -> Result<f64, FfmpegError> {
    if !path.exists() {
        return Err(FfmpegError::VideoNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let output = tokio::process::Command::new(&tools.ffprobe)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
}

/// Write one JPEG every `interval_secs` seconds of `video_path` into `out_dir`.
///
/// Files are named after [`FRAME_PATTERN`], starting at index 1, and
/// overwrite any same-named frames already in `out_dir`. On a non-zero exit
/// the partial output is left in place.
pub async fn extract_frames(
    tools: &MediaTools,
    video_path: &Path,
    interval_secs: u64,
    out_dir: &Path,
) -> Result<ExtractionReport, FfmpegError> {
    if interval_secs < sampling::MIN_INTERVAL_SECS {
        return Err(FfmpegError::InvalidInterval(interval_secs));
    }
    if !video_path.exists() {
        return Err(FfmpegError::VideoNotFound(
            video_path.to_string_lossy().to_string(),
        ));
    }

    tokio::fs::create_dir_all(out_dir).await?;

    tracing::debug!(interval_secs, "Extracting frames");

    let output = tokio::process::Command::new(&tools.ffmpeg)
        .args(["-y", "-i"])
        .arg(video_path)
        .args([
            "-vf",
            &sampling::fps_filter(interval_secs),
            "-q:v",
            &JPEG_QUALITY.to_string(),
        ])
        .arg(out_dir.join(FRAME_PATTERN))
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let frame_count = count_frames(out_dir).await?;
    tracing::debug!(out_dir = %out_dir.display(), frame_count, "Frames saved");

    Ok(ExtractionReport {
        frame_count,
        out_dir: out_dir.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse the single numeric line `ffprobe` prints for `format=duration`.
pub fn parse_duration_output(stdout: &str) -> Result<f64, FfmpegError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(FfmpegError::ParseError("empty duration output".to_string()));
    }

    let secs = trimmed
        .parse::<f64>()
        .map_err(|e| FfmpegError::ParseError(format!("{e}: {trimmed}")))?;

    if !secs.is_finite() || secs <= 0.0 {
        return Err(FfmpegError::ParseError(format!(
            "duration is not a positive number: {trimmed}"
        )));
    }

    Ok(secs)
}

async fn count_frames(dir: &Path) -> Result<usize, std::io::Error> {
    let mut count = 0;
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        if frames::is_jpeg(&entry.path()) {
            count += 1;
        }
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
