// src/feed/mod.rs

pub mod classifier;
pub mod models;
pub mod source;

pub use models::*;
pub use source::{EventSource, LogSource, MonotonicClock, SeverityWeights, ThreatSource};
