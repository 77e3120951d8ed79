//! Process-wide load metrics
//!
//! Four monotone counters shared by every worker through an `Arc`. All
//! mutation goes through atomic increments; the increments are commutative
//! so relaxed ordering is enough. The orchestrator reads a snapshot
//! exactly once, after every worker has joined.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters for one run.
///
/// Counters are never decremented or reset while the run is live.
#[derive(Debug, Default)]
pub struct Metrics {
    succeeded: AtomicU64,
    failed: AtomicU64,
    bytes_sent: AtomicU64,
    bytes_received: AtomicU64,
}

impl Metrics {
    /// Fresh zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful exchange and its response bytes.
    pub fn record_success(&self, bytes_received: u64) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes_received, Ordering::Relaxed);
    }

    /// Record one failed exchange and any partial response bytes.
    pub fn record_failure(&self, bytes_received: u64) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(bytes_received, Ordering::Relaxed);
    }

    /// Account body bytes for one dispatched request.
    pub fn add_bytes_sent(&self, bytes: u64) {
        self.bytes_sent.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Point-in-time copy of all four counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
        }
    }
}

/// Copy of the counters taken after the join barrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Exchanges classified as successes.
    pub succeeded: u64,
    /// Exchanges classified as failures.
    pub failed: u64,
    /// Request body bytes dispatched.
    pub bytes_sent: u64,
    /// Response body bytes received.
    pub bytes_received: u64,
}

impl MetricsSnapshot {
    /// Total exchanges: succeeded + failed.
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_start_at_zero() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());
        assert_eq!(snapshot.total(), 0);
    }

    #[test]
    fn test_record_outcomes() {
        let metrics = Metrics::new();
        metrics.record_success(100);
        metrics.record_success(50);
        metrics.record_failure(7);
        metrics.add_bytes_sent(32);
        metrics.add_bytes_sent(32);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.succeeded, 2);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.total(), 3);
        assert_eq!(snapshot.bytes_sent, 64);
        assert_eq!(snapshot.bytes_received, 157);
    }

    #[test]
    fn test_snapshots_are_monotone() {
        let metrics = Metrics::new();
        metrics.record_success(10);
        let first = metrics.snapshot();
        metrics.record_failure(5);
        metrics.add_bytes_sent(1);
        let second = metrics.snapshot();

        assert!(second.succeeded >= first.succeeded);
        assert!(second.failed >= first.failed);
        assert!(second.bytes_sent >= first.bytes_sent);
        assert!(second.bytes_received >= first.bytes_received);
    }

    #[tokio::test]
    async fn test_concurrent_increments_all_land() {
        let metrics = Arc::new(Metrics::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let metrics = Arc::clone(&metrics);
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    metrics.record_success(3);
                    metrics.add_bytes_sent(2);
                }
            }));
        }
        for handle in handles {
            handle.await.expect("task panicked");
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.succeeded, 800);
        assert_eq!(snapshot.bytes_received, 2400);
        assert_eq!(snapshot.bytes_sent, 1600);
    }
}
