//! Per-slot statistics tracking

use std::time::{Duration, Instant};

/// Counters local to one connection slot.
///
/// Owned exclusively by the slot's worker and returned when the worker
/// reaches its terminal state; never shared while the loop is running.
#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    /// Requests that actually went out on the wire.
    pub requests_sent: u64,

    /// Exchanges that ended in a success outcome.
    pub succeeded: u64,

    /// Exchanges that ended in a failure outcome (including attempts
    /// where the connection never came up).
    pub failed: u64,

    /// Worker start time.
    pub started_at: Option<Instant>,

    /// Worker end time.
    pub ended_at: Option<Instant>,
}

impl WorkerStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking (records start time).
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time).
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Attempts so far: every loop iteration yields exactly one outcome,
    /// so this is succeeded + failed.
    pub fn attempted(&self) -> u64 {
        self.succeeded + self.failed
    }

    /// Record a request dispatched on the wire.
    pub fn record_sent(&mut self) {
        self.requests_sent += 1;
    }

    /// Record a success outcome.
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    /// Record a failure outcome.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Elapsed time since start; live slots measure against now.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }
}
