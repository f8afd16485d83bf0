// src/dashboard.rs
//!
//! Wires buffers, producers, collectors and the API server together.

use crate::api::{ApiServer, ApiSettings, AppState, build_router};
use crate::buffer::EventBuffer;
use crate::collectors::CollectorSet;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::feed::{LogEntry, LogSource, ThreatEvent, ThreatSource};
use crate::producer::{DelayRange, Producer};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Owns the shared buffers for one server process.
pub struct Dashboard {
    config: DashboardConfig,
    threats: EventBuffer<ThreatEvent>,
    logs: EventBuffer<LogEntry>,
    collectors: CollectorSet,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let threats = EventBuffer::new(config.buffers.threat_capacity)?;
        let logs = EventBuffer::new(config.buffers.log_capacity)?;
        let collectors = CollectorSet::from_config(&config.collectors);

        Ok(Self {
            config,
            threats,
            logs,
            collectors,
        })
    }

    pub fn threats(&self) -> &EventBuffer<ThreatEvent> {
        &self.threats
    }

    pub fn logs(&self) -> &EventBuffer<LogEntry> {
        &self.logs
    }

    pub fn router(&self) -> Result<Router> {
        let settings = ApiSettings {
            default_limit: self.config.buffers.default_limit,
            refresh_interval_ms: self.config.refresh.interval_ms,
            trend_bucket_seconds: self.config.refresh.trend_bucket_seconds,
            collectors: self.collectors.names(),
        };
        let state = Arc::new(AppState::new(
            self.threats.clone(),
            self.logs.clone(),
            settings,
        ));
        build_router(state, &self.config.server.allowed_origins)
    }

    /// Start the enabled producers and the collector poller.
    pub fn spawn_background(self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        let producers = &self.config.producers;

        if producers.threats.enabled {
            let source = ThreatSource::new(producers.severity_weights);
            let delay = DelayRange::from(&producers.threats);
            handles.push(Producer::new("threats", source, self.threats.clone(), delay).spawn());
        }
        if producers.logs.enabled {
            let delay = DelayRange::from(&producers.logs);
            handles.push(Producer::new("logs", LogSource::new(), self.logs.clone(), delay).spawn());
        }

        let period = Duration::from_millis(self.config.collectors.poll_interval_ms);
        if let Some(handle) = self.collectors.spawn_polling(self.threats, period) {
            handles.push(handle);
        }

        handles
    }

    /// Serve until Ctrl-C, then stop every background task.
    pub async fn run(self) -> Result<()> {
        let router = self.router()?;
        let server = ApiServer::new(self.config.server.bind_address, router);
        log::info!(
            "Buffering up to {} threat(s) and {} log entries",
            self.threats().capacity(),
            self.logs().capacity()
        );
        let handles = self.spawn_background();

        let result = server.run(shutdown_signal()).await;

        for handle in &handles {
            handle.abort();
        }
        log::info!("Stopped {} background task(s)", handles.len());
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
