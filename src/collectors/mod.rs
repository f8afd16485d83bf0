// src/collectors/mod.rs
//!
//! Optional external feed collectors
//!
//! A collector exists only when its configuration is present. Failures are
//! logged and treated as "no events this round"; they never reach the
//! producer tasks or the API.

use crate::buffer::EventBuffer;
use crate::config::{CollectorsConfig, FeedCollectorConfig};
use crate::error::{DashboardError, Result};
use crate::feed::classifier::predict_severity;
use crate::feed::source::random_location;
use crate::feed::{MonotonicClock, Severity, ThreatEvent, ThreatType};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A source of threat events that lives outside the process.
#[async_trait::async_trait]
pub trait Collector: Send + Sync {
    fn name(&self) -> &str;

    async fn collect(&self) -> Result<Vec<ThreatEvent>>;
}

/// One indicator as published in a local feed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub indicator: String,
    pub threat_type: ThreatType,
    pub severity_score: f64,
    pub confidence_score: f64,
    #[serde(default)]
    pub source: Option<String>,
}

/// Reads a JSON array of [`IndicatorRecord`]s from disk on every poll.
#[derive(Debug)]
pub struct FileFeedCollector {
    name: String,
    path: PathBuf,
    clock: Mutex<MonotonicClock>,
}

impl FileFeedCollector {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            clock: Mutex::new(MonotonicClock::new()),
        }
    }

    /// Build from config; `None` when disabled or missing its path.
    pub fn from_config(config: &FeedCollectorConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let path = config.path.as_ref()?;
        Some(Self::new(config.name.clone(), path.clone()))
    }

    fn to_event(&self, record: IndicatorRecord) -> ThreatEvent {
        let timestamp = self.clock.lock().unwrap_or_else(|e| e.into_inner()).now();
        let severity_score = record.severity_score.clamp(0.0, 10.0);
        let confidence_score = record.confidence_score.clamp(0.0, 1.0);

        ThreatEvent {
            id: Uuid::new_v4(),
            timestamp,
            threat_type: record.threat_type,
            severity: Severity::from_score(severity_score),
            severity_score,
            confidence_score,
            source: record.source.unwrap_or_else(|| self.name.clone()),
            indicator: record.indicator,
            location: random_location(&mut rand::thread_rng()),
            ml_severity: predict_severity(severity_score, confidence_score),
        }
    }
}

#[async_trait::async_trait]
impl Collector for FileFeedCollector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn collect(&self) -> Result<Vec<ThreatEvent>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DashboardError::CollectorError(format!(
                "{}: cannot read {}: {}",
                self.name,
                self.path.display(),
                e
            ))
        })?;
        let records: Vec<IndicatorRecord> = serde_json::from_str(&contents).map_err(|e| {
            DashboardError::CollectorError(format!("{}: malformed feed: {}", self.name, e))
        })?;

        Ok(records.into_iter().map(|r| self.to_event(r)).collect())
    }
}

/// The collectors that were configured for this process.
#[derive(Default)]
pub struct CollectorSet {
    collectors: Vec<Box<dyn Collector>>,
}

impl CollectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CollectorsConfig) -> Self {
        let mut set = Self::new();
        for feed in &config.feeds {
            match FileFeedCollector::from_config(feed) {
                Some(collector) => {
                    collector_log!(LogLevel::Info, "enabled feed '{}'", feed.name);
                    set.push(Box::new(collector));
                }
                None => {
                    collector_log!(
                        LogLevel::Info,
                        "feed '{}' not configured, skipping",
                        feed.name
                    );
                }
            }
        }
        set
    }

    pub fn push(&mut self, collector: Box<dyn Collector>) {
        self.collectors.push(collector);
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.collectors.iter().map(|c| c.name().to_string()).collect()
    }

    /// Run every collector; failed ones contribute nothing.
    pub async fn collect_all(&self) -> Vec<ThreatEvent> {
        let mut events = Vec::new();
        for collector in &self.collectors {
            match collector.collect().await {
                Ok(batch) => {
                    collector_log!(
                        LogLevel::Debug,
                        "'{}' returned {} indicator(s)",
                        collector.name(),
                        batch.len()
                    );
                    events.extend(batch);
                }
                Err(e) => {
                    collector_log!(LogLevel::Warn, "'{}' failed: {}", collector.name(), e);
                }
            }
        }
        events
    }

    /// Poll the set on a fixed period and append results to `buffer`.
    /// Returns `None` when there is nothing to poll.
    pub fn spawn_polling(
        self,
        buffer: EventBuffer<ThreatEvent>,
        period: Duration,
    ) -> Option<JoinHandle<()>> {
        if self.is_empty() {
            return None;
        }
        collector_log!(
            LogLevel::Info,
            "polling {} feed(s) every {:?}",
            self.len(),
            period
        );
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let events = self.collect_all().await;
                if !events.is_empty() {
                    buffer.extend(events);
                }
            }
        }))
    }
}
