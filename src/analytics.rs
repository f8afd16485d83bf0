// src/analytics.rs
//!
//! Aggregates behind the dashboard's summary cards and charts, computed
//! from buffer snapshots.

use crate::feed::{LogEntry, Severity, ThreatEvent, ThreatType, Timestamped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence below which a threat is counted as auto-dismissed
pub const MITIGATION_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub active_threats: usize,
    pub risk_level: Severity,
    pub mitigated: usize,
    pub alerts: usize,
    pub buffered_threats: usize,
    pub buffered_logs: usize,
    pub total_threats_seen: u64,
    pub total_logs_seen: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatDistribution {
    pub by_type: BTreeMap<ThreatType, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub threat_level: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBucket {
    pub bucket_start: DateTime<Utc>,
    pub threats: usize,
}

/// Risk level of the mean severity score over `window` (most recent last).
pub fn risk_level(window: &[ThreatEvent]) -> Severity {
    if window.is_empty() {
        return Severity::Low;
    }
    let mean = window.iter().map(|t| t.severity_score).sum::<f64>() / window.len() as f64;
    Severity::from_score(mean)
}

/// Build the summary cards.
///
/// `risk_window` is the number of most recent threats considered for the
/// risk level; the counters span everything passed in.
pub fn summarize(
    threats: &[ThreatEvent],
    logs: &[LogEntry],
    risk_window: usize,
    total_threats_seen: u64,
    total_logs_seen: u64,
) -> Summary {
    let window_start = threats.len().saturating_sub(risk_window);

    Summary {
        active_threats: threats
            .iter()
            .filter(|t| t.ml_severity >= Severity::High)
            .count(),
        risk_level: risk_level(&threats[window_start..]),
        mitigated: threats
            .iter()
            .filter(|t| t.confidence_score < MITIGATION_CONFIDENCE)
            .count(),
        alerts: logs.iter().filter(|l| l.level.is_alert()).count(),
        buffered_threats: threats.len(),
        buffered_logs: logs.len(),
        total_threats_seen,
        total_logs_seen,
    }
}

pub fn distribution(threats: &[ThreatEvent]) -> ThreatDistribution {
    let mut by_type: BTreeMap<ThreatType, usize> =
        ThreatType::ALL.iter().map(|t| (*t, 0)).collect();
    let mut by_severity: BTreeMap<Severity, usize> =
        Severity::ALL.iter().map(|s| (*s, 0)).collect();

    for threat in threats {
        *by_type.entry(threat.threat_type).or_default() += 1;
        *by_severity.entry(threat.severity).or_default() += 1;
    }

    ThreatDistribution {
        by_type,
        by_severity,
    }
}

pub fn threat_map(threats: &[ThreatEvent]) -> Vec<MapPoint> {
    threats
        .iter()
        .map(|t| MapPoint {
            city: t.location.city.clone(),
            latitude: t.location.latitude,
            longitude: t.location.longitude,
            threat_level: t.ml_severity,
        })
        .collect()
}

/// Count events per `bucket_seconds` slot, oldest slot first.
/// Quiet slots between the first and last event are emitted with a count of 0.
pub fn trend<T: Timestamped>(events: &[T], bucket_seconds: u64) -> Vec<TrendBucket> {
    let width = bucket_seconds.clamp(1, i64::MAX as u64) as i64;
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();

    for event in events {
        let secs = event.timestamp().timestamp();
        *counts.entry(secs.div_euclid(width) * width).or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    (first..=last)
        .step_by(width as usize)
        .filter_map(|start| {
            DateTime::<Utc>::from_timestamp(start, 0).map(|bucket_start| TrendBucket {
                bucket_start,
                threats: counts.get(&start).copied().unwrap_or(0),
            })
        })
        .collect()
}
