//! Media-side building blocks for vidaio.
//!
//! Wraps the external `ffprobe`/`ffmpeg` tools, computes the frame
//! sampling plan, and owns the scratch directory frames are written to.

pub mod error;
pub mod ffmpeg;
pub mod frames;
pub mod sampling;
