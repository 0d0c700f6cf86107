use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use vidaio_analyzer::analyzer::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use vidaio_analyzer::api::DEFAULT_BASE_URL;
use vidaio_analyzer::{AnalyzerSettings, AnthropicApi, ApiError};
use vidaio_core::ffmpeg::MediaTools;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Inference service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub api_key: String,
    pub base_url: String,
    pub settings: AnalyzerSettings,
    /// Overall HTTP timeout; `None` keeps the client defaults.
    pub request_timeout: Option<Duration>,
}

impl AnalyzerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                     |
    /// |-------------------------------|-----------------------------|
    /// | `ANTHROPIC_API_KEY`           | required                    |
    /// | `ANTHROPIC_BASE_URL`          | `https://api.anthropic.com` |
    /// | `VIDAIO_MODEL`                | `claude-sonnet-4-5`         |
    /// | `VIDAIO_MAX_TOKENS`           | `1000`                      |
    /// | `VIDAIO_TEMPERATURE`          | `0.3`                       |
    /// | `VIDAIO_REQUEST_TIMEOUT_SECS` | unset (no override)         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AnalyzerConfig::from_env`] but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingVar("ANTHROPIC_API_KEY"))?;

        let base_url = lookup("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = lookup("VIDAIO_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        let max_tokens = parse_var(&lookup, "VIDAIO_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = parse_var(&lookup, "VIDAIO_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
        let request_timeout =
            parse_var::<u64>(&lookup, "VIDAIO_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs);

        if !(0.0..=1.0).contains(&temperature) {
            return Err(ConfigError::InvalidVar {
                name: "VIDAIO_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0.0 and 1.0".into(),
            });
        }

        Ok(Self {
            api_key,
            base_url,
            settings: AnalyzerSettings {
                model,
                max_tokens,
                temperature,
            },
            request_timeout,
        })
    }

    /// Construct the Messages API client described by this config.
    pub fn build_client(&self) -> Result<AnthropicApi, ApiError> {
        match self.request_timeout {
            Some(timeout) => {
                AnthropicApi::with_timeout(self.api_key.clone(), self.base_url.clone(), timeout)
            }
            None => Ok(AnthropicApi::new(self.api_key.clone(), self.base_url.clone())),
        }
    }
}

/// Media binary locations from `FFPROBE_PATH` / `FFMPEG_PATH`.
pub fn media_tools_from_env() -> MediaTools {
    media_tools_from_lookup(|name| std::env::var(name).ok())
}

pub fn media_tools_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MediaTools {
    let defaults = MediaTools::default();
    MediaTools {
        ffprobe: lookup("FFPROBE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.ffprobe),
        ffmpeg: lookup("FFMPEG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.ffmpeg),
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map(Some).map_err(|e| ConfigError::InvalidVar {
                name,
                reason: e.to_string(),
                value,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
