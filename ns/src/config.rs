//! notestore configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{DEFAULT_CHANNEL_BUFFER, Latency, StoreOptions};

/// Main notestore configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.store.latency_min_ms > self.store.latency_max_ms {
            return Err(eyre::eyre!(
                "store.latency-min-ms ({}) is greater than store.latency-max-ms ({})",
                self.store.latency_min_ms,
                self.store.latency_max_ms
            ));
        }
        if self.store.channel_buffer == 0 {
            return Err(eyre::eyre!("store.channel-buffer must be at least 1"));
        }
        Ok(())
    }

    /// Config files tried in order when no explicit path is given:
    /// `./.notestore.yml`, then `<config dir>/notestore/notestore.yml`
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".notestore.yml")];
        paths.extend(dirs::config_dir().map(|dir| dir.join("notestore").join("notestore.yml")));
        paths
    }

    /// Load the explicit config, else the first readable candidate, else defaults.
    ///
    /// An explicit path must load; a broken candidate is skipped with a warning.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }
        Ok(Self::load_first(&Self::candidate_paths()))
    }

    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config"),
            }
        }
        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,

    /// Host used in `Location` headers when a request carries no Host header
    #[serde(rename = "public-host")]
    pub public_host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            public_host: "localhost:8080".to_string(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON seed file; the built-in notes are used when unset
    #[serde(rename = "seed-path")]
    pub seed_path: Option<PathBuf>,

    /// Lower bound of simulated reply latency
    #[serde(rename = "latency-min-ms")]
    pub latency_min_ms: u64,

    /// Upper bound of simulated reply latency
    #[serde(rename = "latency-max-ms")]
    pub latency_max_ms: u64,

    /// Command channel capacity
    #[serde(rename = "channel-buffer")]
    pub channel_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            latency_min_ms: 50,
            latency_max_ms: 100,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

impl StoreConfig {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            latency: Latency::between(self.latency_min_ms, self.latency_max_ms),
            channel_buffer: self.channel_buffer,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path; logs go to stderr when unset
    pub file: Option<PathBuf>,
}
