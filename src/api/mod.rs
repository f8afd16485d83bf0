// src/api/mod.rs
//!
//! Read-only JSON surface consumed by the dashboard front end.
//!
//! Endpoints:
//! - GET /api/latest-threats?limit=K - Most recent threats, oldest first
//! - GET /api/latest-logs?limit=K - Most recent log entries, oldest first
//! - GET /api/summary - Summary card counters
//! - GET /api/threat-distribution - Threat counts by type and severity
//! - GET /api/threat-map - Geo points for the current threat window
//! - GET /api/trend - Threat counts per time bucket
//! - GET /api/config - Polling settings for the front end
//! - GET /health - Liveness

pub mod handlers;
pub mod models;
pub mod server;

pub use handlers::{ApiSettings, AppState};
pub use server::{ApiServer, build_router};
