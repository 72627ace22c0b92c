//! Engine configuration
//!
//! All knobs are optional in the source document; every section falls back
//! to defaults that match the reference deployment.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration for a guard runtime
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub oracle: OracleConfig,
    pub engine: EngineConfig,
    pub traffic: TrafficConfig,
    pub files: FileCacheConfig,
}

impl GuardConfig {
    /// Parse configuration from a TOML document
    pub fn from_toml_str(doc: &str) -> Result<Self> {
        toml::from_str(doc).map_err(|e| Error::Config(format!("Invalid TOML configuration: {}", e)))
    }

    /// Load configuration from a TOML file on disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_toml_str(&doc)
    }
}

/// Remote oracle connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL of the oracle backend
    pub base_url: String,

    /// Shared bound for every collaborator call (validate, approval
    /// lookup, text extraction, reporting)
    pub timeout_ms: u64,
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_ms: 3_000,
        }
    }
}

/// Decision engine settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Text shorter than this is never evaluated
    pub min_text_len: usize,

    /// Window during which identical content triggers at most one report
    pub report_horizon_secs: u64,
}

impl EngineConfig {
    pub fn report_horizon(&self) -> Duration {
        Duration::from_secs(self.report_horizon_secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_text_len: 5,
            report_horizon_secs: 10,
        }
    }
}

/// Traffic classification settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Substrings identifying telemetry/analytics destinations. Pure
    /// containment, not a domain parse.
    pub skip_url_substrings: Vec<String>,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            skip_url_substrings: [
                "google-analytics.com",
                "googletagmanager.com",
                "segment.io",
                "segment.com",
                "amplitude.com",
                "mixpanel.com",
                "sentry.io",
                "datadoghq.com",
                "statsig.com",
                "intercom.io",
                "/telemetry",
                "/collect",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// File cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Absolute time-to-live per insertion; hits do not extend it
    pub ttl_secs: u64,

    /// Extensions read in-process as text
    pub text_extensions: Vec<String>,

    /// Extensions delegated to the oracle's extraction call
    pub remote_extensions: Vec<String>,
}

impl FileCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            text_extensions: [
                "txt", "md", "markdown", "csv", "tsv", "json", "log", "xml", "yaml", "yml",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            remote_extensions: vec!["pdf".to_string()],
        }
    }
}
