// src/tests/test_buffer.rs

use super::fixtures::{Tick, ticks};
use crate::buffer::{EventBuffer, RingBuffer};
use crate::error::DashboardError;
use std::sync::Arc;
use tokio::sync::Barrier;

#[test]
fn test_zero_capacity_rejected() {
    match RingBuffer::<u32>::new(0) {
        Err(DashboardError::ConfigError(msg)) => assert!(msg.contains("capacity")),
        other => panic!("Expected ConfigError, got {:?}", other),
    }
    assert!(EventBuffer::<u32>::new(0).is_err());
}

#[test]
fn test_capacity_three_scenario() {
    let mut ring = RingBuffer::new(3).unwrap();
    for event in ["A", "B", "C", "D"] {
        ring.append(event);
    }

    assert_eq!(ring.len(), 3);
    assert_eq!(ring.snapshot(), vec!["B", "C", "D"]);
    assert_eq!(ring.recent(2), vec!["C", "D"]);
    assert_eq!(ring.total_appended(), 4);
}

#[test]
fn test_empty_buffer_recent() {
    let ring = RingBuffer::<Tick>::new(10).unwrap();
    assert!(ring.is_empty());
    assert!(ring.recent(5).is_empty());
}

#[test]
fn test_recent_zero_is_empty() {
    let mut ring = RingBuffer::new(4).unwrap();
    ring.append(1);
    ring.append(2);
    assert!(ring.recent(0).is_empty());
}

#[test]
fn test_recent_larger_than_len_returns_all() {
    let mut ring = RingBuffer::new(10).unwrap();
    for i in 0..4 {
        ring.append(i);
    }
    assert_eq!(ring.recent(4), vec![0, 1, 2, 3]);
    assert_eq!(ring.recent(100), vec![0, 1, 2, 3]);
}

#[test]
fn test_recent_is_idempotent() {
    let mut ring = RingBuffer::new(5).unwrap();
    for i in 0..8 {
        ring.append(i);
    }
    let first = ring.recent(3);
    let second = ring.recent(3);
    assert_eq!(first, second);
    assert_eq!(first, vec![5, 6, 7]);
}

#[test]
fn test_wraparound_keeps_order_across_many_laps() {
    let mut ring = RingBuffer::new(7).unwrap();
    for i in 0..100u32 {
        ring.append(i);
        let expected: Vec<u32> = (i.saturating_sub(6)..=i).collect();
        assert_eq!(ring.snapshot(), expected);
    }
}

#[test]
fn test_capacity_one() {
    let mut ring = RingBuffer::new(1).unwrap();
    ring.append("first");
    ring.append("second");
    assert_eq!(ring.snapshot(), vec!["second"]);
    assert_eq!(ring.recent(3), vec!["second"]);
}

#[test]
fn test_thousand_capacity_recent_fifty_ascending() {
    let buffer = EventBuffer::new(1000).unwrap();
    for tick in ticks(1050) {
        buffer.append(tick);
    }

    assert_eq!(buffer.len(), 1000);
    let recent = buffer.recent(50);
    assert_eq!(recent.len(), 50);
    let seqs: Vec<u64> = recent.iter().map(|t| t.seq).collect();
    assert_eq!(seqs, (1000..1050).collect::<Vec<_>>());
    assert!(recent.windows(2).all(|w| w[0].at < w[1].at));

    // oldest retained entry is the 51st appended
    assert_eq!(buffer.snapshot().first().map(|t| t.seq), Some(50));
}

#[test]
fn test_clones_share_storage() {
    let buffer = EventBuffer::new(3).unwrap();
    let reader = buffer.clone();
    buffer.append(1);
    buffer.extend([2, 3, 4]);

    assert_eq!(reader.snapshot(), vec![2, 3, 4]);
    assert_eq!(reader.total_appended(), 4);
    assert_eq!(reader.capacity(), 3);
}

#[test]
fn test_large_capacity_is_not_reserved_up_front() {
    let mut ring = RingBuffer::new(usize::MAX).unwrap();
    for i in 0..5u8 {
        ring.append(i);
    }
    assert_eq!(ring.capacity(), usize::MAX);
    assert_eq!(ring.recent(2), vec![3, 4]);
}

#[test]
fn test_buffer_usable_after_writer_panics_mid_batch() {
    let buffer = EventBuffer::new(3).unwrap();
    buffer.extend([1, 2, 3]);

    let writer = buffer.clone();
    let result = std::thread::spawn(move || {
        // 4 lands, then the batch panics while the lock is held
        writer.extend((4..).map(|i| {
            if i == 5 {
                panic!("feed decoder crashed");
            }
            i
        }));
    })
    .join();
    assert!(result.is_err());

    assert_eq!(buffer.snapshot(), vec![2, 3, 4]);
    buffer.append(9);
    assert_eq!(buffer.snapshot(), vec![3, 4, 9]);
    assert_eq!(buffer.recent(2), vec![4, 9]);
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.total_appended(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_do_not_lose_or_duplicate() {
    const TASKS: u64 = 64;
    const PER_TASK: u64 = 50;

    let buffer = EventBuffer::new(10_000).unwrap();
    let barrier = Arc::new(Barrier::new(TASKS as usize));

    let mut handles = Vec::new();
    for task in 0..TASKS {
        let buffer = buffer.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            for i in 0..PER_TASK {
                buffer.append(task * PER_TASK + i);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut stored = buffer.snapshot();
    assert_eq!(stored.len(), (TASKS * PER_TASK) as usize);
    stored.sort_unstable();
    stored.dedup();
    assert_eq!(stored.len(), (TASKS * PER_TASK) as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_respect_capacity() {
    let buffer = EventBuffer::new(16).unwrap();

    let handles: Vec<_> = (0..200u32)
        .map(|i| {
            let buffer = buffer.clone();
            tokio::spawn(async move { buffer.append(i) })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(buffer.len(), 16);
    assert_eq!(buffer.total_appended(), 200);
    let stored = buffer.snapshot();
    assert!(stored.iter().all(|v| *v < 200));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_more_than_capacity() {
    let buffer = EventBuffer::new(32).unwrap();
    let writer = {
        let buffer = buffer.clone();
        tokio::spawn(async move {
            for i in 0..5_000u32 {
                buffer.append(i);
                if i % 100 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    for _ in 0..500 {
        let window = buffer.recent(64);
        assert!(window.len() <= 32);
        assert!(window.windows(2).all(|w| w[0] < w[1]));
        tokio::task::yield_now().await;
    }
    writer.await.unwrap();
}
