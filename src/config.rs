// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the fixed-window guard service.
//!
//! Values are layered: built-in defaults, then an optional JSON file named by
//! `CONFIG_FILE`, then individual environment variables.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors, raised once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Per-endpoint window limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Stale record eviction
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Demo API key settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Rejection response shaping
    #[serde(default)]
    pub response: ResponseConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// A single fixed window: at most `max_requests` per `window_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Admission ceiling within one window
    pub max_requests: u32,
}

/// Limits for each protected endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// `/api/secure-endpoint` (default: 100 per minute)
    #[serde(default = "default_secure_window")]
    pub secure_endpoint: WindowConfig,

    /// `/api/sensitive` (default: 50 per minute)
    #[serde(default = "default_sensitive_window")]
    pub sensitive: WindowConfig,
}

/// Periodic eviction of records whose window ended long ago.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between sweeps (default: 60)
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,

    /// How long past its window end a record is kept (default: 60000)
    #[serde(default = "default_window_ms")]
    pub grace_ms: u64,
}

/// Demo API key configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Expected `X-API-Key` value (default: secret123, demo only)
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

/// How rejections are rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Emit a `Retry-After` header on 429 (default: false)
    #[serde(default)]
    pub retry_after_hint: bool,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_secure_window() -> WindowConfig {
    WindowConfig {
        window_ms: default_window_ms(),
        max_requests: 100,
    }
}

fn default_sensitive_window() -> WindowConfig {
    WindowConfig {
        window_ms: default_window_ms(),
        max_requests: 50,
    }
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_api_key() -> String {
    "secret123".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            limits: LimitsConfig::default(),
            sweep: SweepConfig::default(),
            api: ApiConfig::default(),
            response: ResponseConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            secure_endpoint: default_secure_window(),
            sensitive: default_sensitive_window(),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_secs: default_sweep_interval_secs(),
            grace_ms: default_window_ms(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl WindowConfig {
    pub fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.window_ms == 0 {
            return Err(ConfigError::Invalid(format!(
                "{name}.window_ms must be positive"
            )));
        }
        if self.max_requests == 0 {
            return Err(ConfigError::Invalid(format!(
                "{name}.max_requests must be positive"
            )));
        }
        Ok(())
    }
}

impl SweepConfig {
    /// Get the sweep interval
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Load configuration from `CONFIG_FILE` (if set) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_env_overrides(|var| std::env::var(var).ok())
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(window_ms) = parse_env(&lookup, "RATE_WINDOW_MS")? {
            self.limits.secure_endpoint.window_ms = window_ms;
            self.limits.sensitive.window_ms = window_ms;
        }
        if let Some(max) = parse_env(&lookup, "SECURE_MAX_REQUESTS")? {
            self.limits.secure_endpoint.max_requests = max;
        }
        if let Some(max) = parse_env(&lookup, "SENSITIVE_MAX_REQUESTS")? {
            self.limits.sensitive.max_requests = max;
        }
        if let Some(enabled) = parse_env(&lookup, "SWEEP_ENABLED")? {
            self.sweep.enabled = enabled;
        }
        if let Some(secs) = parse_env(&lookup, "SWEEP_INTERVAL_SECS")? {
            self.sweep.interval_secs = secs;
        }
        if let Some(grace) = parse_env(&lookup, "SWEEP_GRACE_MS")? {
            self.sweep.grace_ms = grace;
        }
        if let Some(key) = lookup("API_KEY") {
            self.api.api_key = key;
        }
        if let Some(hint) = parse_env(&lookup, "RETRY_AFTER_HINT")? {
            self.response.retry_after_hint = hint;
        }
        if let Some(enabled) = parse_env(&lookup, "METRICS_ENABLED")? {
            self.metrics.enabled = enabled;
        }
        Ok(self)
    }

    /// Reject configurations the limiter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr.parse::<SocketAddr>().map_err(|_| {
            ConfigError::Invalid(format!("bind_addr {:?} is not a socket address", self.bind_addr))
        })?;
        self.limits.secure_endpoint.validate("limits.secure_endpoint")?;
        self.limits.sensitive.validate("limits.sensitive")?;
        if self.sweep.enabled && self.sweep.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sweep.interval_secs must be positive".to_string(),
            ));
        }
        if self.api.api_key.is_empty() {
            return Err(ConfigError::Invalid("api.api_key must not be empty".to_string()));
        }
        if !self.metrics.path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "metrics.path {:?} must start with '/'",
                self.metrics.path
            )));
        }
        Ok(())
    }
}

fn parse_env<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        None => Ok(None),
    }
}
