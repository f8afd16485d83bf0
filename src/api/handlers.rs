// src/api/handlers.rs
// Read-only API handlers over the shared event buffers

use crate::analytics::{self, MapPoint, Summary, ThreatDistribution, TrendBucket};
use crate::api::models::*;
use crate::buffer::EventBuffer;
use crate::error::{DashboardError, Result};
use crate::feed::{LogEntry, ThreatEvent};
use crate::logging::LogLevel;
use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use std::time::Instant;

/// Settings the handlers need besides the buffers themselves
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub default_limit: usize,
    pub refresh_interval_ms: u64,
    pub trend_bucket_seconds: u64,
    pub collectors: Vec<String>,
}

pub struct AppState {
    pub threats: EventBuffer<ThreatEvent>,
    pub logs: EventBuffer<LogEntry>,
    pub settings: ApiSettings,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        threats: EventBuffer<ThreatEvent>,
        logs: EventBuffer<LogEntry>,
        settings: ApiSettings,
    ) -> Self {
        Self {
            threats,
            logs,
            settings,
            started_at: Instant::now(),
        }
    }

    /// The most recent threats considered "current" by the charts
    fn threat_window(&self) -> Vec<ThreatEvent> {
        self.threats.recent(self.settings.default_limit)
    }
}

/// Resolve `?limit=`: missing uses the default, non-positive means none.
/// Integers too large for `usize` saturate, so they return the whole buffer.
pub fn resolve_limit(query: &LimitQuery, default_limit: usize) -> Result<usize> {
    let raw = match query.limit.as_deref().map(str::trim) {
        None | Some("") => return Ok(default_limit),
        Some(raw) => raw,
    };

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DashboardError::QueryError(format!(
            "limit must be an integer, got '{}'",
            raw
        )));
    }

    if negative {
        return Ok(0);
    }
    Ok(digits.parse::<usize>().unwrap_or(usize::MAX))
}

pub async fn latest_threats(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<ThreatEvent>>> {
    let limit = resolve_limit(&query, app_state.settings.default_limit)?;
    api_log!(LogLevel::Debug, "latest-threats limit={}", limit);
    Ok(Json(app_state.threats.recent(limit)))
}

pub async fn latest_logs(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<LogEntry>>> {
    let limit = resolve_limit(&query, app_state.settings.default_limit)?;
    api_log!(LogLevel::Debug, "latest-logs limit={}", limit);
    Ok(Json(app_state.logs.recent(limit)))
}

pub async fn summary(State(app_state): State<Arc<AppState>>) -> Json<Summary> {
    let threats = app_state.threats.snapshot();
    let logs = app_state.logs.snapshot();

    Json(analytics::summarize(
        &threats,
        &logs,
        app_state.settings.default_limit,
        app_state.threats.total_appended(),
        app_state.logs.total_appended(),
    ))
}

pub async fn threat_distribution(
    State(app_state): State<Arc<AppState>>,
) -> Json<ThreatDistribution> {
    Json(analytics::distribution(&app_state.threats.snapshot()))
}

pub async fn threat_map(State(app_state): State<Arc<AppState>>) -> Json<Vec<MapPoint>> {
    Json(analytics::threat_map(&app_state.threat_window()))
}

pub async fn trend(State(app_state): State<Arc<AppState>>) -> Json<Vec<TrendBucket>> {
    if app_state.threats.is_empty() {
        return Json(Vec::new());
    }
    Json(analytics::trend(
        &app_state.threats.snapshot(),
        app_state.settings.trend_bucket_seconds,
    ))
}

pub async fn client_config(State(app_state): State<Arc<AppState>>) -> Json<ClientConfigResponse> {
    Json(ClientConfigResponse {
        refresh_interval_ms: app_state.settings.refresh_interval_ms,
        default_limit: app_state.settings.default_limit,
        threat_capacity: app_state.threats.capacity(),
        log_capacity: app_state.logs.capacity(),
        collectors: app_state.settings.collectors.clone(),
    })
}

pub async fn health(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: app_state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
