// src/error.rs

use std::fmt;
use std::io;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Custom error type for threatwatch operations
#[derive(Debug)]
#[allow(clippy::enum_variant_names)] // Error suffix is intentional for clarity
pub enum DashboardError {
    /// IO-related errors
    IoError(io::Error),
    /// Configuration file or value errors
    ConfigError(String),
    /// An optional feed collector failed to initialize or respond
    CollectorError(String),
    /// Malformed query parameters on a read endpoint
    QueryError(String),
    /// JSON encoding/decoding errors
    SerializationError(String),
    /// HTTP server errors (bind, runtime)
    ApiError(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::IoError(e) => write!(f, "IO error: {}", e),
            DashboardError::ConfigError(e) => write!(f, "Config error: {}", e),
            DashboardError::CollectorError(e) => write!(f, "Collector error: {}", e),
            DashboardError::QueryError(e) => write!(f, "Query error: {}", e),
            DashboardError::SerializationError(e) => write!(f, "Serialization error: {}", e),
            DashboardError::ApiError(e) => write!(f, "API error: {}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl DashboardError {
    fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::QueryError(_) => StatusCode::BAD_REQUEST,
            DashboardError::ConfigError(_) => StatusCode::BAD_REQUEST,
            DashboardError::CollectorError(_) => StatusCode::BAD_GATEWAY,
            DashboardError::IoError(_)
            | DashboardError::SerializationError(_)
            | DashboardError::ApiError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "timestamp": chrono::Local::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<io::Error> for DashboardError {
    fn from(err: io::Error) -> Self {
        DashboardError::IoError(err)
    }
}

impl From<String> for DashboardError {
    fn from(err: String) -> Self {
        DashboardError::ApiError(err)
    }
}

impl From<&str> for DashboardError {
    fn from(err: &str) -> Self {
        DashboardError::ApiError(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::ConfigError(format!("YAML parsing error: {}", err))
    }
}

/// Result type for threatwatch operations
pub type Result<T> = std::result::Result<T, DashboardError>;
