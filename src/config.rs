// src/config.rs
//!
//! Dashboard configuration
//!
//! Loaded from a YAML file. Every section is optional and falls back to the
//! defaults below, so an empty file is a valid configuration.

use crate::error::{DashboardError, Result};
use crate::feed::SeverityWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for the dashboard backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub buffers: BufferConfig,
    pub producers: ProducersConfig,
    pub refresh: RefreshConfig,
    pub collectors: CollectorsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    /// CORS whitelist for the presentation layer
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 5000)),
            allowed_origins: vec![
                "http://localhost:8080".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub threat_capacity: usize,
    pub log_capacity: usize,
    /// Number of events returned when a request has no `limit`
    pub default_limit: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            threat_capacity: 1000,
            log_capacity: 1000,
            default_limit: 50,
        }
    }
}

/// Delay window for one background producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    pub enabled: bool,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl ProducerConfig {
    fn new(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            enabled: true,
            min_delay_ms,
            max_delay_ms,
        }
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self::new(1000, 3000)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducersConfig {
    pub threats: ProducerConfig,
    pub logs: ProducerConfig,
    pub severity_weights: SeverityWeights,
}

impl Default for ProducersConfig {
    fn default() -> Self {
        Self {
            threats: ProducerConfig::new(1000, 3000),
            logs: ProducerConfig::new(500, 2000),
            severity_weights: SeverityWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Polling period advertised to the presentation layer
    pub interval_ms: u64,
    /// Width of one bucket on the trend chart
    pub trend_bucket_seconds: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            trend_bucket_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorsConfig {
    pub poll_interval_ms: u64,
    pub feeds: Vec<FeedCollectorConfig>,
}

impl Default for CollectorsConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 30_000,
            feeds: Vec::new(),
        }
    }
}

/// An optional external feed. Built only when enabled and `path` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedCollectorConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

/// Upper bound on either buffer's capacity
pub const MAX_BUFFER_CAPACITY: usize = 1_000_000;

impl DashboardConfig {
    /// Reject values that would make a buffer, producer or timer unusable.
    pub fn validate(&self) -> Result<()> {
        if self.buffers.threat_capacity == 0 || self.buffers.log_capacity == 0 {
            return Err(DashboardError::ConfigError(
                "buffer capacities must be greater than zero".to_string(),
            ));
        }
        for (name, capacity) in [
            ("threat_capacity", self.buffers.threat_capacity),
            ("log_capacity", self.buffers.log_capacity),
        ] {
            if capacity > MAX_BUFFER_CAPACITY {
                return Err(DashboardError::ConfigError(format!(
                    "{} ({}) exceeds the maximum of {}",
                    name, capacity, MAX_BUFFER_CAPACITY
                )));
            }
        }
        if self.buffers.default_limit == 0 {
            return Err(DashboardError::ConfigError(
                "default_limit must be greater than zero".to_string(),
            ));
        }
        for (name, producer) in [
            ("threats", &self.producers.threats),
            ("logs", &self.producers.logs),
        ] {
            if producer.min_delay_ms > producer.max_delay_ms {
                return Err(DashboardError::ConfigError(format!(
                    "producer '{}': min_delay_ms ({}) exceeds max_delay_ms ({})",
                    name, producer.min_delay_ms, producer.max_delay_ms
                )));
            }
            // a zero upper bound would run the producer loop without ever sleeping
            if producer.enabled && producer.max_delay_ms == 0 {
                return Err(DashboardError::ConfigError(format!(
                    "producer '{}': max_delay_ms must be greater than zero",
                    name
                )));
            }
        }
        if self.producers.severity_weights.total() == 0 {
            return Err(DashboardError::ConfigError(
                "severity_weights must not all be zero".to_string(),
            ));
        }
        if self.refresh.interval_ms == 0 || self.refresh.trend_bucket_seconds == 0 {
            return Err(DashboardError::ConfigError(
                "refresh interval and trend bucket must be greater than zero".to_string(),
            ));
        }
        if self.collectors.poll_interval_ms == 0 {
            return Err(DashboardError::ConfigError(
                "collectors.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Parse and validate a configuration document.
pub fn parse_config(contents: &str) -> Result<DashboardConfig> {
    // serde_yaml reads an empty document as null rather than an empty map
    let config: DashboardConfig = if contents.trim().is_empty() {
        DashboardConfig::default()
    } else {
        serde_yaml::from_str(contents)?
    };
    config.validate()?;
    Ok(config)
}

/// Loads a configuration from a YAML file.
pub fn load_config_from_file(path: &Path) -> Result<DashboardConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        DashboardError::ConfigError(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&contents)
}
