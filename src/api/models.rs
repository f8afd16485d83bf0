// src/api/models.rs
// API models for the dashboard backend

use serde::{Deserialize, Serialize};

/// `?limit=` on the feed endpoints. Kept as a string so a bad value gets
/// the standard error body instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfigResponse {
    pub refresh_interval_ms: u64,
    pub default_limit: usize,
    pub threat_capacity: usize,
    pub log_capacity: usize,
    pub collectors: Vec<String>,
}
