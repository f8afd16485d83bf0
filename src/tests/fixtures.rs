//! Test fixtures and builders for threatwatch testing

use crate::feed::{
    EntryLevel, GeoLocation, LogEntry, Severity, ThreatEvent, ThreatType, Timestamped,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

/// Minimal timestamped record for buffer tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub seq: u64,
    pub at: DateTime<Utc>,
}

impl Timestamped for Tick {
    fn timestamp(&self) -> DateTime<Utc> {
        self.at
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// `count` ticks one second apart starting at [`epoch`]
pub fn ticks(count: u64) -> Vec<Tick> {
    (0..count)
        .map(|seq| Tick {
            seq,
            at: epoch() + Duration::seconds(seq as i64),
        })
        .collect()
}

pub struct ThreatBuilder {
    event: ThreatEvent,
}

impl ThreatBuilder {
    pub fn new() -> Self {
        Self {
            event: ThreatEvent {
                id: Uuid::new_v4(),
                timestamp: epoch(),
                threat_type: ThreatType::Malware,
                severity: Severity::Medium,
                severity_score: 5.0,
                confidence_score: 0.9,
                source: "fixture".to_string(),
                indicator: "198.51.100.7".to_string(),
                location: GeoLocation {
                    city: "London".to_string(),
                    latitude: 51.5074,
                    longitude: -0.1278,
                },
                ml_severity: Severity::Medium,
            },
        }
    }

    pub fn at_offset(mut self, seconds: i64) -> Self {
        self.event.timestamp = epoch() + Duration::seconds(seconds);
        self
    }

    pub fn kind(mut self, threat_type: ThreatType) -> Self {
        self.event.threat_type = threat_type;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.event.severity = severity;
        self
    }

    pub fn scores(mut self, severity_score: f64, confidence_score: f64) -> Self {
        self.event.severity_score = severity_score;
        self.event.confidence_score = confidence_score;
        self
    }

    pub fn ml(mut self, severity: Severity) -> Self {
        self.event.ml_severity = severity;
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.event.location.city = city.to_string();
        self
    }

    pub fn build(self) -> ThreatEvent {
        self.event
    }
}

pub fn log_entry(level: EntryLevel) -> LogEntry {
    LogEntry {
        id: Uuid::new_v4(),
        timestamp: epoch(),
        level,
        host: "web-01".to_string(),
        component: "nginx".to_string(),
        message: "fixture".to_string(),
    }
}
