//! Frame sampling plan.
//!
//! Turns a probed duration and a requested frame count ("precision") into
//! the whole-second interval handed to ffmpeg's `fps` filter.

use crate::error::CoreError;

/// Default number of frames sampled across a video.
pub const DEFAULT_PRECISION: u32 = 5;

/// Smallest interval ffmpeg is asked for. Sub-second sampling is not supported.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Interval between extracted frames, derived from duration and precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPlan {
    /// Probed container duration in seconds.
    pub duration_secs: f64,
    /// Requested number of frames across the whole video.
    pub precision: u32,
    /// Seconds between consecutive frames (always >= [`MIN_INTERVAL_SECS`]).
    pub interval_secs: u64,
    /// `true` when `round(duration) / precision` fell below the minimum and
    /// was raised to [`MIN_INTERVAL_SECS`].
    pub clamped: bool,
}

impl SamplingPlan {
    /// Compute `round(duration) / precision` with integer division.
    ///
    /// Exact halves round to even, so 8.5 s counts as 8 and 9.5 s as 10.
    pub fn new(duration_secs: f64, precision: u32) -> Result<Self, CoreError> {
        if precision == 0 {
            return Err(CoreError::Validation(
                "precision must be greater than zero".to_string(),
            ));
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(CoreError::Validation(format!(
                "duration must be a positive finite number of seconds, got {duration_secs}"
            )));
        }

        let rounded = duration_secs.round_ties_even() as u64;
        let raw = rounded / u64::from(precision);
        let clamped = raw < MIN_INTERVAL_SECS;
        let interval_secs = raw.max(MIN_INTERVAL_SECS);

        if clamped {
            tracing::warn!(
                duration_secs,
                precision,
                interval_secs,
                "Requested precision exceeds video length; sampling every second instead",
            );
        }

        Ok(Self {
            duration_secs,
            precision,
            interval_secs,
            clamped,
        })
    }

    /// Value for ffmpeg's `-vf` argument, e.g. `fps=1/19`.
    pub fn fps_filter(&self) -> String {
        fps_filter(self.interval_secs)
    }
}

/// Render the `fps` filter for a whole-second interval.
pub fn fps_filter(interval_secs: u64) -> String {
    format!("fps=1/{interval_secs}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
