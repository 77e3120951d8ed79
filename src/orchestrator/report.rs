//! Final run report

use std::time::Duration;

use crate::metrics::MetricsSnapshot;

/// Aggregate results of one complete run.
///
/// Built exactly once, from the metrics snapshot taken after the join
/// barrier.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Total exchanges: succeeded + failed.
    pub total: u64,

    /// Exchanges classified as successes.
    pub succeeded: u64,

    /// Exchanges classified as failures.
    pub failed: u64,

    /// Overall throughput: total / elapsed seconds.
    pub requests_per_second: f64,

    /// Request body kilobytes dispatched.
    pub kb_sent: f64,

    /// Response body kilobytes received.
    pub kb_received: f64,
}

impl RunReport {
    /// Build the report from a post-join snapshot.
    pub fn new(snapshot: MetricsSnapshot, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        let requests_per_second = if secs > 0.0 {
            snapshot.total() as f64 / secs
        } else {
            0.0
        };

        Self {
            elapsed,
            total: snapshot.total(),
            succeeded: snapshot.succeeded,
            failed: snapshot.failed,
            requests_per_second,
            kb_sent: snapshot.bytes_sent as f64 / 1024.0,
            kb_received: snapshot.bytes_received as f64 / 1024.0,
        }
    }
}
