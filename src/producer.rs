// src/producer.rs
//!
//! Background producers that push synthetic events into a shared buffer
//! at randomized intervals.

use crate::buffer::EventBuffer;
use crate::config::ProducerConfig;
use crate::feed::EventSource;
use crate::logging::LogLevel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Uniform delay window between two generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[cfg(test)]
    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl From<&ProducerConfig> for DelayRange {
    fn from(config: &ProducerConfig) -> Self {
        Self::new(config.min_delay(), config.max_delay())
    }
}

/// Couples one event source to one buffer.
pub struct Producer<S: EventSource> {
    name: String,
    source: S,
    buffer: EventBuffer<S::Event>,
    delay: DelayRange,
    rng: StdRng,
}

impl<S: EventSource> Producer<S> {
    pub fn new(
        name: impl Into<String>,
        source: S,
        buffer: EventBuffer<S::Event>,
        delay: DelayRange,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            buffer,
            delay,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generate one event and append it. Returns the delay before the next step.
    pub fn step(&mut self) -> Duration {
        let event = self.source.next_event();
        self.buffer.append(event);
        self.delay.sample(&mut self.rng)
    }

    /// Run until the task is aborted.
    pub async fn run(mut self) {
        producer_log!(
            LogLevel::Info,
            "'{}' started ({:?}..{:?} between events)",
            self.name(),
            self.delay.min(),
            self.delay.max()
        );
        loop {
            let delay = self.step();
            producer_log!(
                LogLevel::Trace,
                "'{}' appended event, buffer now holds {}",
                self.name(),
                self.buffer.len()
            );
            tokio::time::sleep(delay).await;
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
