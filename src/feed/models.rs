// src/feed/models.rs
//!
//! Event records produced by the synthetic feeds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anything stored in an event buffer carries a creation timestamp.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Threat severity, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Severity {
    #[serde(rename = "low")]
    #[default]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "critical")]
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Map a 0-10 score onto a severity band
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            Severity::Critical
        } else if score >= 6.0 {
            Severity::High
        } else if score >= 3.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Score band drawn from for this severity
    pub fn score_range(&self) -> (f64, f64) {
        match self {
            Severity::Low => (0.5, 3.0),
            Severity::Medium => (3.0, 6.0),
            Severity::High => (6.0, 8.5),
            Severity::Critical => (8.5, 10.0),
        }
    }
}

/// Threat categories shown on the distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThreatType {
    #[serde(rename = "malware")]
    Malware,
    #[serde(rename = "phishing")]
    Phishing,
    #[serde(rename = "ddos")]
    DDoS,
    #[serde(rename = "ransomware")]
    Ransomware,
    #[serde(rename = "botnet")]
    Botnet,
    #[serde(rename = "data_exfiltration")]
    DataExfiltration,
    #[serde(rename = "brute_force")]
    BruteForce,
}

impl ThreatType {
    pub const ALL: [ThreatType; 7] = [
        ThreatType::Malware,
        ThreatType::Phishing,
        ThreatType::DDoS,
        ThreatType::Ransomware,
        ThreatType::Botnet,
        ThreatType::DataExfiltration,
        ThreatType::BruteForce,
    ];
}

/// Geographic origin attributed to a threat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A single threat-intelligence observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub threat_type: ThreatType,
    pub severity: Severity,
    pub severity_score: f64,
    pub confidence_score: f64,
    pub source: String,
    pub indicator: String,
    pub location: GeoLocation,
    /// Classifier verdict derived from the two scores
    pub ml_severity: Severity,
}

impl Timestamped for ThreatEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Log entry level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryLevel {
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "critical")]
    Critical,
}

impl EntryLevel {
    /// Levels that count toward the dashboard's alert card
    pub fn is_alert(&self) -> bool {
        matches!(self, EntryLevel::Error | EntryLevel::Critical)
    }
}

/// A single monitored log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: EntryLevel,
    pub host: String,
    pub component: String,
    pub message: String,
}

impl Timestamped for LogEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
