// src/api/server.rs
// HTTP server for the dashboard backend

use crate::api::handlers::*;
use crate::error::{DashboardError, Result};
use crate::logging::LogLevel;
use axum::http::{HeaderValue, Method};
use axum::{Router, routing::get};
use http::header::{ACCEPT, CONTENT_TYPE};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the read-only router. Only GET routes are exposed.
pub fn build_router(app_state: Arc<AppState>, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                DashboardError::ConfigError(format!("invalid CORS origin '{}': {}", origin, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let router = Router::new()
        .route("/api/latest-threats", get(latest_threats))
        .route("/api/latest-logs", get(latest_logs))
        .route("/api/summary", get(summary))
        .route("/api/threat-distribution", get(threat_distribution))
        .route("/api/threat-map", get(threat_map))
        .route("/api/trend", get(trend))
        .route("/api/config", get(client_config))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET])
                .allow_headers([CONTENT_TYPE, ACCEPT])
                .allow_credentials(false),
        )
        .with_state(app_state);

    Ok(router)
}

pub struct ApiServer {
    address: SocketAddr,
    router: Router,
}

impl ApiServer {
    pub fn new(address: SocketAddr, router: Router) -> Self {
        Self { address, router }
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        api_log!(LogLevel::Info, "Starting API server on {}", self.address);

        let listener = tokio::net::TcpListener::bind(self.address)
            .await
            .map_err(|e| {
                DashboardError::ApiError(format!(
                    "Failed to bind to address {}: {}",
                    self.address, e
                ))
            })?;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| DashboardError::ApiError(format!("Server runtime error: {}", e)))?;

        Ok(())
    }
}
