//! Configuration loading for video-search
//!
//! Configuration is loaded from:
//! 1. Environment variables VIDEO_SEARCH_SOURCE and SEARXNG_URL (overrides)
//! 2. Environment variable VIDEO_SEARCH_CONFIG_PATH
//! 3. ~/.video-search/config.toml
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown result source '{0}' (expected 'fixed' or 'searxng')")]
    UnknownSource(String),

    #[error("invalid SearXNG URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Which result source backs the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Two sample videos after a fixed delay
    #[default]
    Fixed,
    /// A SearXNG instance
    Searxng,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(SourceKind::Fixed),
            "searxng" => Ok(SourceKind::Searxng),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Fixed sample source configuration
    #[serde(default)]
    pub fixed: FixedConfig,
    /// SearXNG specific configuration
    #[serde(default)]
    pub searxng: SearXNGConfig,
}

/// General search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result source to use
    #[serde(default)]
    pub source: SourceKind,
    /// Maximum number of results to return
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Per-call timeout in seconds (unset = wait indefinitely)
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Fixed sample source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedConfig {
    /// Delay before the sample results are returned
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

/// SearXNG configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearXNGConfig {
    /// SearXNG instance URL
    #[serde(default = "default_searxng_url")]
    pub url: String,
    /// Engines to use (comma-separated, empty = use instance defaults)
    #[serde(default)]
    pub engines: String,
}

// Default value functions
fn default_max_results() -> usize {
    10
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_searxng_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            max_results: default_max_results(),
            timeout_seconds: None,
        }
    }
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for SearXNGConfig {
    fn default() -> Self {
        Self {
            url: default_searxng_url(),
            engines: String::new(),
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl FixedConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// `path` (e.g. from a CLI flag) takes priority over
    /// `VIDEO_SEARCH_CONFIG_PATH` and the default location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load configuration, reading environment variables through `env`
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| Self::find_config_path(&env));
        let mut config = Self::load_from(path.as_deref())?;

        let source = env("VIDEO_SEARCH_SOURCE")
            .map(|s| s.parse::<SourceKind>())
            .transpose()?;
        config.apply_overrides(source, env("SEARXNG_URL"));

        Ok(config)
    }

    /// Load configuration from an explicit path (defaults when missing)
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::info!("No config path specified, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides that take priority over the file
    pub fn apply_overrides(&mut self, source: Option<SourceKind>, searxng_url: Option<String>) {
        if let Some(source) = source {
            self.search.source = source;
        }
        if let Some(url) = searxng_url {
            self.searxng.url = url;
        }
    }

    /// Find the configuration file path
    fn find_config_path(env: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
        // 1. Check environment variable
        if let Some(path) = env("VIDEO_SEARCH_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.video-search/config.toml
        if let Some(home) = env("HOME") {
            let path = PathBuf::from(home).join(".video-search").join("config.toml");
            return Some(path);
        }

        None
    }
}
