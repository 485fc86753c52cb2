//! Configuration management for newsdesk
//!
//! This module handles loading and validating configuration from a TOML file
//! and `NEWSDESK_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classifier::{ContentShapeThresholds, SearchFilterThresholds};

/// Default public cache mirror; the original URL is appended verbatim
pub const DEFAULT_CACHE_MIRROR_PREFIX: &str = "https://webcache.googleusercontent.com/search?q=cache:";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fetcher configuration
    pub fetcher: FetcherConfig,

    /// Collection storage configuration
    pub storage: StorageConfig,

    /// Classifier thresholds
    pub classifier: ClassifierConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Fetcher-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Fixed User-Agent; a browser UA is picked from a built-in pool when unset
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Accept-Language header value
    pub accept_language: String,

    /// Prefix of the cache mirror used after access-denied/not-found failures
    pub cache_mirror_prefix: String,
}

/// Collection storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the CSV file holding the collection
    pub path: PathBuf,
}

/// Classifier thresholds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Search-result relevance filter thresholds
    pub search: SearchFilterThresholds,

    /// Extracted-content shape thresholds
    pub content: ContentShapeThresholds,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: 30,
            accept_language: String::from("en-US,en;q=0.9"),
            cache_mirror_prefix: String::from(DEFAULT_CACHE_MIRROR_PREFIX),
        }
    }
}

impl FetcherConfig {
    /// Per-request timeout as a Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/full_articles.csv"),
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
    /// Load configuration from defaults plus environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from an optional file, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        let config = base.with_env_overrides()?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    /// Override fields from `NEWSDESK_*` environment variables
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(ua) = std::env::var("NEWSDESK_USER_AGENT") {
            self.fetcher.user_agent = Some(ua).filter(|s| !s.trim().is_empty());
        }

        if let Ok(raw) = std::env::var("NEWSDESK_REQUEST_TIMEOUT") {
            self.fetcher.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("NEWSDESK_REQUEST_TIMEOUT is not a number: {raw}"))?;
        }

        if let Ok(prefix) = std::env::var("NEWSDESK_CACHE_MIRROR") {
            self.fetcher.cache_mirror_prefix = prefix;
        }

        if let Ok(path) = std::env::var("NEWSDESK_STORE_PATH") {
            self.storage.path = PathBuf::from(path);
        }

        if let Ok(level) = std::env::var("NEWSDESK_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("NEWSDESK_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.timeout_secs == 0 {
            anyhow::bail!("fetcher.timeout_secs must be greater than 0");
        }

        let prefix = &self.fetcher.cache_mirror_prefix;
        if !(prefix.starts_with("http://") || prefix.starts_with("https://")) {
            anyhow::bail!("fetcher.cache_mirror_prefix must be an http(s) URL prefix: {prefix}");
        }

        if self.storage.path.as_os_str().is_empty() {
            anyhow::bail!("storage.path must not be empty");
        }

        self.classifier.search.validate()?;
        self.classifier.content.validate()?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }
}
