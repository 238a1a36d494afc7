//! Configuration management for the stopfake coordinator
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The analysis section is additionally exposed as
//! a [`SharedConfig`] handle: the coordinator resolves a fresh snapshot per
//! submission, so runtime edits (e.g. through the config API) take effect on
//! the next request without a restart.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Default backend endpoint, matching the bundled analysis API
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/analyze";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis request configuration
    pub analysis: AnalysisConfig,

    /// HTTP service configuration
    pub service: ServiceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analysis-specific configuration
///
/// This is the externally owned config record of the coordinator: it is
/// treated as read-only input and re-resolved for every submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Analysis backend endpoint URL
    pub backend_url: String,

    /// Whether extraction-side callers should analyze pages automatically
    pub auto_analyze: bool,

    /// Request timeout in seconds for one analysis attempt
    pub request_timeout_secs: u64,

    /// Minimum text length worth submitting, in chars
    pub min_text_chars: usize,

    /// Maximum text length submitted to the backend, in chars
    pub max_text_chars: usize,
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the API server listens on
    pub bind_address: SocketAddr,

    /// Enable permissive CORS (viewers usually live on other origins)
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,

    /// Capacity of the state-change broadcast channel
    pub events_buffer: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            auto_analyze: true,
            request_timeout_secs: 30,
            min_text_chars: 50,
            max_text_chars: 4000,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8787".parse().expect("valid default address"),
            enable_cors: true,
            enable_request_logging: true,
            events_buffer: 64,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; malformed values are ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STOPFAKE_BACKEND_URL") {
            config.analysis.backend_url = url;
        }

        if let Some(auto) = std::env::var("STOPFAKE_AUTO_ANALYZE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            config.analysis.auto_analyze = auto;
        }

        if let Some(timeout) = std::env::var("STOPFAKE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.analysis.request_timeout_secs = timeout;
        }

        if let Some(min) = std::env::var("STOPFAKE_MIN_TEXT_CHARS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.analysis.min_text_chars = min;
        }

        if let Some(max) = std::env::var("STOPFAKE_MAX_TEXT_CHARS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.analysis.max_text_chars = max;
        }

        if let Some(addr) = std::env::var("STOPFAKE_BIND_ADDRESS")
            .ok()
            .and_then(|v| v.parse::<SocketAddr>().ok())
        {
            config.service.bind_address = addr;
        }

        if let Some(buffer) = std::env::var("STOPFAKE_EVENTS_BUFFER")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.service.events_buffer = buffer;
        }

        if let Ok(level) = std::env::var("STOPFAKE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("STOPFAKE_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.analysis.backend_url)
            .with_context(|| format!("invalid backend_url: {}", self.analysis.backend_url))?;

        if self.analysis.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.analysis.max_text_chars <= self.analysis.min_text_chars {
            anyhow::bail!("max_text_chars must be greater than min_text_chars");
        }

        if self.service.events_buffer == 0 {
            anyhow::bail!("events_buffer must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis.request_timeout_secs)
    }
}

/// Shared, runtime-editable handle over the analysis config record
///
/// The coordinator calls [`SharedConfig::resolve`] at the start of every
/// submission so edits made between requests are picked up, matching the
/// no-caching contract of the config record.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<AnalysisConfig>>,
}

impl SharedConfig {
    /// Wrap an analysis config record
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Resolve a fresh snapshot of the record
    pub async fn resolve(&self) -> AnalysisConfig {
        self.inner.read().await.clone()
    }

    /// Replace the record; takes effect on the next submission
    pub async fn update(&self, config: AnalysisConfig) {
        *self.inner.write().await = config;
    }
}
