//! Client configuration.

use crate::PollPolicy;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vidgen_error::ConfigError;

/// Default Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default video model.
pub const DEFAULT_MODEL: &str = "veo-2.0-generate-001";
/// Default delay between job status polls, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
/// Default ceiling on total polling time, in seconds.
pub const DEFAULT_MAX_POLL_WAIT_SECS: u64 = 20 * 60;
/// Default per-request HTTP timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

const API_KEY_VAR: &str = "GEMINI_API_KEY";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidgen")
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_max_poll_wait_secs() -> Option<u64> {
    Some(DEFAULT_MAX_POLL_WAIT_SECS)
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Configuration for the generation client and local history.
///
/// # Examples
///
/// ```
/// use vidgen_core::VidgenConfigBuilder;
///
/// let config = VidgenConfigBuilder::default()
///     .api_key("secret")
///     .max_poll_attempts(30u32)
///     .build()
///     .unwrap();
/// assert_eq!(*config.poll_interval_secs(), 10);
/// assert_eq!(*config.max_poll_attempts(), Some(30));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct VidgenConfig {
    /// Gemini API key; read from `GEMINI_API_KEY` when absent from a file
    #[serde(default, skip_serializing)]
    api_key: String,
    /// API base URL
    #[serde(default = "default_base_url")]
    #[builder(default = "default_base_url()")]
    base_url: String,
    /// Video model identifier
    #[serde(default = "default_model")]
    #[builder(default = "default_model()")]
    model: String,
    /// Directory holding the history container
    #[serde(default = "default_data_dir")]
    #[builder(default = "default_data_dir()")]
    data_dir: PathBuf,
    /// Seconds between job status polls
    #[serde(default = "default_poll_interval_secs")]
    #[builder(default = "default_poll_interval_secs()")]
    poll_interval_secs: u64,
    /// Give up after this many polls (unbounded when `None`)
    #[serde(default)]
    #[builder(default)]
    max_poll_attempts: Option<u32>,
    /// Give up after polling this long (unbounded when `None`)
    #[serde(default = "default_max_poll_wait_secs")]
    #[builder(default = "default_max_poll_wait_secs()")]
    max_poll_wait_secs: Option<u64>,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    #[builder(default = "default_request_timeout_secs()")]
    request_timeout_secs: u64,
}

impl std::fmt::Debug for VidgenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VidgenConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("data_dir", &self.data_dir)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("max_poll_wait_secs", &self.max_poll_wait_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl VidgenConfig {
    /// Create config from environment variables.
    ///
    /// Loads a `.env` file if present, then reads:
    /// - `GEMINI_API_KEY` (required)
    /// - `VIDGEN_BASE_URL`, `VIDGEN_MODEL`, `VIDGEN_DATA_DIR`
    /// - `VIDGEN_POLL_INTERVAL_SECS`, `VIDGEN_MAX_POLL_ATTEMPTS`, `VIDGEN_MAX_POLL_WAIT_SECS`
    /// - `VIDGEN_REQUEST_TIMEOUT_SECS`
    #[tracing::instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} not set", API_KEY_VAR)))?;

        let mut builder = VidgenConfigBuilder::default();
        builder.api_key(api_key);

        if let Some(base_url) = lookup("VIDGEN_BASE_URL") {
            builder.base_url(base_url);
        }
        if let Some(model) = lookup("VIDGEN_MODEL") {
            builder.model(model);
        }
        if let Some(dir) = lookup("VIDGEN_DATA_DIR") {
            builder.data_dir(PathBuf::from(dir));
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VIDGEN_POLL_INTERVAL_SECS")? {
            builder.poll_interval_secs(secs);
        }
        if let Some(attempts) = parse_var::<u32>(&lookup, "VIDGEN_MAX_POLL_ATTEMPTS")? {
            builder.max_poll_attempts(attempts);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VIDGEN_MAX_POLL_WAIT_SECS")? {
            builder.max_poll_wait_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "VIDGEN_REQUEST_TIMEOUT_SECS")? {
            builder.request_timeout_secs(secs);
        }

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))
    }

    /// Load configuration from a TOML file.
    ///
    /// The API key may be left out of the file; it is then taken from
    /// `GEMINI_API_KEY`.
    #[tracing::instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let _ = dotenvy::dotenv();
        Self::from_toml_str(&content, |key| std::env::var(key).ok())
    }

    /// Parse TOML content, filling a missing API key from `lookup`.
    pub fn from_toml_str(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.api_key.trim().is_empty() {
            config.api_key = lookup(API_KEY_VAR)
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    ConfigError::new(format!("No api_key in file and {} not set", API_KEY_VAR))
                })?;
        }
        Ok(config)
    }

    /// Delay between job status polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Total polling budget, if bounded.
    pub fn max_poll_wait(&self) -> Option<Duration> {
        self.max_poll_wait_secs.map(Duration::from_secs)
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The polling policy these settings describe.
    pub fn poll_policy(&self) -> PollPolicy {
        let mut policy = PollPolicy::unbounded(self.poll_interval());
        if let Some(attempts) = self.max_poll_attempts {
            policy = policy.with_max_attempts(attempts);
        }
        if let Some(wait) = self.max_poll_wait() {
            policy = policy.with_max_wait(wait);
        }
        policy
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::new(format!("{} is not a valid number: {}", key, raw))),
    }
}
