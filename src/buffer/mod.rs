// src/buffer/mod.rs
//!
//! Bounded, insertion-ordered event storage
//!
//! [`RingBuffer`] is the single-owner ring; [`EventBuffer`] is the shared
//! handle handed to producers and to the API layer.

use crate::error::{DashboardError, Result};
use std::sync::{Arc, Mutex, MutexGuard};

// Slots reserved up front; larger rings grow on demand as they fill
const INITIAL_SLOTS: usize = 1024;

/// Fixed-capacity ring that overwrites its oldest entry when full.
///
/// Slots fill in order until `capacity` is reached; after that `head`
/// points at the oldest entry and each append overwrites it.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    head: usize,
    capacity: usize,
    total_appended: u64,
}

impl<T: Clone> RingBuffer<T> {
    /// Create an empty ring. Capacity must be positive.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DashboardError::ConfigError(
                "event buffer capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            slots: Vec::with_capacity(capacity.min(INITIAL_SLOTS)),
            head: 0,
            capacity,
            total_appended: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of events ever appended, including evicted ones
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }

    /// Append an event, evicting the oldest one first when full.
    pub fn append(&mut self, event: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(event);
        } else {
            self.slots[self.head] = event;
            self.head = (self.head + 1) % self.capacity;
        }
        self.total_appended += 1;
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Up to `k` most recent events, oldest of the window first
    pub fn recent(&self, k: usize) -> Vec<T> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }
        let take = k.min(self.len());
        self.iter().skip(self.len() - take).cloned().collect()
    }

    /// Every stored event, oldest first
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// Cloneable, thread-safe handle to a shared [`RingBuffer`].
///
/// Each call takes the lock for a single append or a single copy-out, so
/// readers never see a ring mid-eviction.
#[derive(Debug)]
pub struct EventBuffer<T> {
    inner: Arc<Mutex<RingBuffer<T>>>,
}

impl<T> Clone for EventBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> EventBuffer<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(RingBuffer::new(capacity)?)),
        })
    }

    // append never leaves the ring half-updated, so a poisoned lock is safe to reuse
    fn lock(&self) -> MutexGuard<'_, RingBuffer<T>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn append(&self, event: T) {
        self.lock().append(event);
    }

    /// Append a batch under one lock acquisition, preserving batch order
    pub fn extend<I: IntoIterator<Item = T>>(&self, events: I) {
        let mut ring = self.lock();
        for event in events {
            ring.append(event);
        }
    }

    pub fn recent(&self, k: usize) -> Vec<T> {
        self.lock().recent(k)
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.lock().snapshot()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn total_appended(&self) -> u64 {
        self.lock().total_appended()
    }
}
