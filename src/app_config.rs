use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO); omit to auto-detect from the input
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language code (ISO); omit to choose interactively
    #[serde(default)]
    pub target_language: Option<String>,

    /// Pipeline config
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Provider config
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Optional append-only run log file
    #[serde(default)]
    pub log_file: Option<String>,
}

/// Backoff shape applied between retry attempts
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// Same delay before every retry
    #[default]
    Fixed,
    /// Delay grows by the base amount each retry
    Linear,
    /// Delay doubles each retry
    Exponential,
}

/// Settings for the translation pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineSettings {
    /// Maximum number of concurrent remote calls
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Attempt budget per line, including the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retry attempts (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Minimum spacing between two calls on the same permit slot (in
    /// milliseconds); with the default 5 permits this caps aggregate
    /// throughput at roughly 5 calls per second
    #[serde(default = "default_call_cooldown_ms")]
    pub call_cooldown_ms: u64,

    /// Backoff shape between retries
    #[serde(default)]
    pub backoff: BackoffKind,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            call_cooldown_ms: default_call_cooldown_ms(),
            backoff: BackoffKind::default(),
        }
    }
}

impl PipelineSettings {
    /// Base retry backoff as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Permit cooldown as a Duration
    pub fn call_cooldown(&self) -> Duration {
        Duration::from_millis(self.call_cooldown_ms)
    }
}

/// Settings for the remote translation provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds; a timed-out call counts as a
    /// retryable failure
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_concurrency() -> usize {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_call_cooldown_ms() -> u64 {
    1000
}

fn default_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.max_concurrency == 0 {
            return Err(anyhow!("max_concurrency must be at least 1"));
        }
        if self.pipeline.max_retries == 0 {
            return Err(anyhow!("max_retries must be at least 1"));
        }
        if self.provider.endpoint.trim().is_empty() {
            return Err(anyhow!("Provider endpoint cannot be empty"));
        }

        if let Some(source) = &self.source_language {
            crate::language_utils::validate_language_code(source)?;
        }
        if let Some(target) = &self.target_language {
            crate::language_utils::validate_language_code(target)?;
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: None,
            target_language: None,
            pipeline: PipelineSettings::default(),
            provider: ProviderSettings::default(),
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}
