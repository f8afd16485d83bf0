// src/feed/source.rs
//!
//! Synthetic event sources
//!
//! Each source draws its fields from fixed category pools and stamps every
//! event from its own monotonic clock.

use super::classifier::predict_severity;
use super::models::*;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generator of synthetic events. Generation cannot fail.
pub trait EventSource: Send + 'static {
    type Event: Clone + Send + 'static;

    fn next_event(&mut self) -> Self::Event;
}

/// Wall clock that never goes backwards
#[derive(Debug, Clone, Default)]
pub struct MonotonicClock {
    last: Option<DateTime<Utc>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamped = match self.last {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last = Some(stamped);
        stamped
    }
}

/// Relative weights used when drawing a threat severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityWeights {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 15,
            medium: 40,
            high: 35,
            critical: 10,
        }
    }
}

impl SeverityWeights {
    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical
    }

    fn pool(&self) -> [(Severity, u32); 4] {
        [
            (Severity::Low, self.low),
            (Severity::Medium, self.medium),
            (Severity::High, self.high),
            (Severity::Critical, self.critical),
        ]
    }
}

const THREAT_FEEDS: &[&str] = &[
    "AlienVault OTX",
    "VirusTotal",
    "Abuse.ch",
    "Emerging Threats",
    "Internal IDS",
];

const INDICATOR_PREFIXES: &[u8] = &[23, 45, 77, 91, 103, 141, 185, 193, 203];

const LOCATIONS: &[(&str, f64, f64)] = &[
    ("New York", 40.7128, -74.0060),
    ("London", 51.5074, -0.1278),
    ("Tokyo", 35.6762, 139.6503),
    ("Frankfurt", 50.1109, 8.6821),
    ("Sao Paulo", -23.5505, -46.6333),
    ("Singapore", 1.3521, 103.8198),
    ("Moscow", 55.7558, 37.6173),
    ("Sydney", -33.8688, 151.2093),
];

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Pick one element of a non-empty constant pool
fn pick<'a, T, R: Rng>(rng: &mut R, pool: &'a [T]) -> &'a T {
    &pool[rng.gen_range(0..pool.len())]
}

pub(crate) fn random_indicator<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        pick(rng, INDICATOR_PREFIXES),
        rng.gen_range(0..=255u8),
        rng.gen_range(0..=255u8),
        rng.gen_range(1..=254u8)
    )
}

pub(crate) fn random_location<R: Rng>(rng: &mut R) -> GeoLocation {
    let (city, latitude, longitude) = *pick(rng, LOCATIONS);
    GeoLocation {
        city: city.to_string(),
        latitude,
        longitude,
    }
}

/// Synthetic threat-intelligence feed
#[derive(Debug)]
pub struct ThreatSource {
    rng: StdRng,
    clock: MonotonicClock,
    weights: SeverityWeights,
}

impl Default for ThreatSource {
    fn default() -> Self {
        Self::new(SeverityWeights::default())
    }
}

impl ThreatSource {
    pub fn new(weights: SeverityWeights) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            clock: MonotonicClock::new(),
            weights,
        }
    }

    /// Deterministic source for reproducible output
    pub fn with_seed(weights: SeverityWeights, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: MonotonicClock::new(),
            weights,
        }
    }

    fn draw_severity(&mut self) -> Severity {
        self.weights
            .pool()
            .choose_weighted(&mut self.rng, |(_, weight)| *weight)
            .map(|(severity, _)| *severity)
            .unwrap_or(Severity::Medium)
    }
}

impl EventSource for ThreatSource {
    type Event = ThreatEvent;

    fn next_event(&mut self) -> ThreatEvent {
        let severity = self.draw_severity();
        let (lo, hi) = severity.score_range();
        let severity_score = round_to(self.rng.gen_range(lo..hi), 1);
        let confidence_score = round_to(self.rng.gen_range(0.3..1.0), 2);

        ThreatEvent {
            id: Uuid::new_v4(),
            timestamp: self.clock.now(),
            threat_type: *pick(&mut self.rng, &ThreatType::ALL),
            severity,
            severity_score,
            confidence_score,
            source: pick(&mut self.rng, THREAT_FEEDS).to_string(),
            indicator: random_indicator(&mut self.rng),
            location: random_location(&mut self.rng),
            ml_severity: predict_severity(severity_score, confidence_score),
        }
    }
}

const HOSTS: &[&str] = &["web-01", "web-02", "db-01", "auth-01", "vpn-gw", "mail-01"];

const LEVEL_WEIGHTS: &[(EntryLevel, u32)] = &[
    (EntryLevel::Info, 60),
    (EntryLevel::Warning, 25),
    (EntryLevel::Error, 12),
    (EntryLevel::Critical, 3),
];

const INFO_MESSAGES: &[(&str, &str)] = &[
    ("sshd", "Accepted publickey for deploy"),
    ("nginx", "GET /api/health 200"),
    ("auth", "User session refreshed"),
    ("kernel", "Firewall rule set reloaded"),
];

const WARNING_MESSAGES: &[(&str, &str)] = &[
    ("sshd", "Failed password for invalid user admin"),
    ("nginx", "Upstream response time above threshold"),
    ("auth", "Multiple MFA challenges for one account"),
];

const ERROR_MESSAGES: &[(&str, &str)] = &[
    ("postgres", "Permission denied for relation users"),
    ("nginx", "Request blocked by WAF rule 942100"),
    ("auth", "Account locked after repeated failures"),
];

const CRITICAL_MESSAGES: &[(&str, &str)] = &[
    ("kernel", "Outbound connection to known C2 address"),
    ("auth", "Privilege escalation attempt detected"),
];

/// Synthetic log monitor
#[derive(Debug)]
pub struct LogSource {
    rng: StdRng,
    clock: MonotonicClock,
}

impl Default for LogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            clock: MonotonicClock::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: MonotonicClock::new(),
        }
    }
}

impl EventSource for LogSource {
    type Event = LogEntry;

    fn next_event(&mut self) -> LogEntry {
        let level = LEVEL_WEIGHTS
            .choose_weighted(&mut self.rng, |(_, weight)| *weight)
            .map(|(level, _)| *level)
            .unwrap_or(EntryLevel::Info);

        let messages = match level {
            EntryLevel::Info => INFO_MESSAGES,
            EntryLevel::Warning => WARNING_MESSAGES,
            EntryLevel::Error => ERROR_MESSAGES,
            EntryLevel::Critical => CRITICAL_MESSAGES,
        };
        let (component, text) = *pick(&mut self.rng, messages);
        let peer = random_indicator(&mut self.rng);

        LogEntry {
            id: Uuid::new_v4(),
            timestamp: self.clock.now(),
            level,
            host: pick(&mut self.rng, HOSTS).to_string(),
            component: component.to_string(),
            message: format!("{} (peer {})", text, peer),
        }
    }
}
