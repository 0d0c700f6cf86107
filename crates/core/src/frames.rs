//! Extracted frame files and the scratch directory that holds them.
//!
//! Frames are written by ffmpeg as `frame_0001.jpg`, `frame_0002.jpg`, ...
//! The fixed-width index makes lexicographic order equal to chronological
//! order for up to 9999 frames, so [`FrameSet`] only needs a plain sort.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// ffmpeg output pattern for extracted frames.
pub const FRAME_PATTERN: &str = "frame_%04d.jpg";

/// Largest frame index whose name keeps the 4-digit width.
pub const MAX_ORDERED_FRAMES: u32 = 9999;

/// File name ffmpeg produces for the 1-based frame `index`.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:04}.jpg")
}

/// Whether `path` has a JPEG extension (`jpg` / `jpeg`, any case).
pub fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// FrameSet
// ---------------------------------------------------------------------------

/// Ordered JPEG frames found in a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<PathBuf>,
}

impl FrameSet {
    /// List `dir`, keep JPEG files only, and sort them by file name.
    pub async fn collect(dir: &Path) -> Result<Self, CoreError> {
        let mut frames = Vec::new();
        let mut read_dir = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            if is_jpeg(&path) && entry.file_type().await?.is_file() {
                frames.push(path);
            }
        }

        frames.sort();

        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.frames.iter().map(PathBuf::as_path)
    }
}

// ---------------------------------------------------------------------------
// WorkDir
// ---------------------------------------------------------------------------

/// What happened when a [`WorkDir`] was removed.
#[derive(Debug)]
pub enum CleanupOutcome {
    /// The directory and its contents were deleted.
    Removed,
    /// Nothing existed at the path any more.
    Missing,
    /// Removal failed; the directory may be partially deleted.
    Failed(std::io::Error),
}

/// Scratch directory for extracted frames.
///
/// Removed by [`WorkDir::close`]; if the owner returns early without
/// closing, `Drop` makes a best-effort removal instead.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    closed: bool,
}

impl WorkDir {
    /// Create `path` (and any parents). An existing directory is reused.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        tokio::fs::create_dir_all(&path).await?;
        tracing::debug!(path = %path.display(), "Working directory ready");
        Ok(Self {
            path,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything in it.
    pub async fn close(mut self) -> CleanupOutcome {
        self.closed = true;
        let outcome = match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => CleanupOutcome::Removed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CleanupOutcome::Missing,
            Err(e) => CleanupOutcome::Failed(e),
        };
        log_outcome(&self.path, &outcome);
        outcome
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let outcome = match std::fs::remove_dir_all(&self.path) {
            Ok(()) => CleanupOutcome::Removed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CleanupOutcome::Missing,
            Err(e) => CleanupOutcome::Failed(e),
        };
        log_outcome(&self.path, &outcome);
    }
}

fn log_outcome(path: &Path, outcome: &CleanupOutcome) {
    match outcome {
        CleanupOutcome::Removed => {
            tracing::debug!(path = %path.display(), "Deleted working directory and extracted frames");
        }
        CleanupOutcome::Missing => {
            tracing::debug!(path = %path.display(), "Working directory does not exist");
        }
        CleanupOutcome::Failed(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete working directory");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
