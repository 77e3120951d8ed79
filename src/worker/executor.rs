//! Worker execution loop

use std::sync::Arc;
use std::time::Instant;

use crate::classifier::Outcome;
use crate::client::ExchangeClient;
use crate::error::ExchangeError;
use crate::metrics::Metrics;

use super::rate_limiter::RequestRateLimiter;
use super::stats::WorkerStats;

/// When a worker stops issuing new requests.
///
/// The check runs between loop iterations only, so an exchange already in
/// flight when a deadline passes is allowed to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop after this many attempts on the slot.
    RequestCount(u64),
    /// Stop once the shared wall-clock deadline has passed; the request
    /// budget is unbounded in this mode.
    Deadline(Instant),
}

/// One connection slot: connect, send one request, classify, close, repeat.
///
/// Every iteration is a full connect/send/await/close cycle on a fresh
/// connection. Failures are isolated to the iteration that produced them:
/// the loop records the outcome and keeps going, with no backoff and no
/// retry cap, bounded only by the connect timeout.
pub struct Worker {
    /// Slot ordinal, 1-based.
    slot: usize,

    /// Transport seam (shared across workers via Arc).
    client: Arc<dyn ExchangeClient>,

    /// Shared metrics aggregator.
    metrics: Arc<Metrics>,

    /// Per-slot pacing.
    rate_limiter: RequestRateLimiter,

    /// Stop condition.
    stop_condition: StopCondition,
}

impl Worker {
    pub(crate) fn new(
        slot: usize,
        client: Arc<dyn ExchangeClient>,
        metrics: Arc<Metrics>,
        rate_limiter: RequestRateLimiter,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            slot,
            client,
            metrics,
            rate_limiter,
            stop_condition,
        }
    }

    /// Run the slot loop to completion and return the per-slot stats.
    pub async fn run(self) -> WorkerStats {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(slot = self.slot, "worker started");

        loop {
            if self.should_stop(&stats) {
                break;
            }

            match self.client.execute().await {
                Ok(outcome) => {
                    stats.record_sent();
                    self.metrics.add_bytes_sent(self.client.bytes_per_request());
                    match outcome {
                        Outcome::Success { bytes_received } => {
                            stats.record_success();
                            self.metrics.record_success(bytes_received);
                        }
                        Outcome::Failure { bytes_received } => {
                            stats.record_failure();
                            self.metrics.record_failure(bytes_received);
                        }
                    }
                }
                Err(ExchangeError::Connect { kind, message }) => {
                    // Nothing was sent; the attempt still consumes budget.
                    stats.record_failure();
                    self.metrics.record_failure(0);
                    tracing::warn!(
                        slot = self.slot,
                        kind = kind.label(),
                        error = %message,
                        "connect failed"
                    );
                    if kind.is_addr_exhaustion() {
                        tracing::warn!(
                            slot = self.slot,
                            "local port/address space exhausted; lower the connection count \
                             or widen the ephemeral port range"
                        );
                    }
                }
                Err(ExchangeError::Transport {
                    bytes_received,
                    message,
                }) => {
                    // The request went out before the exchange died.
                    stats.record_sent();
                    self.metrics.add_bytes_sent(self.client.bytes_per_request());
                    stats.record_failure();
                    self.metrics.record_failure(bytes_received);
                    tracing::warn!(slot = self.slot, error = %message, "exchange failed mid-flight");
                }
            }

            self.rate_limiter.wait().await;
        }

        stats.stop();
        tracing::debug!(
            slot = self.slot,
            sent = stats.requests_sent,
            succeeded = stats.succeeded,
            failed = stats.failed,
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "worker finished"
        );

        stats
    }

    /// Stop check: budget exhausted or deadline passed.
    ///
    /// The budget counts attempts, so a target that never accepts a
    /// connection still produces exactly the configured number of failures
    /// per slot rather than looping forever.
    fn should_stop(&self, stats: &WorkerStats) -> bool {
        match self.stop_condition {
            StopCondition::RequestCount(budget) => stats.attempted() >= budget,
            StopCondition::Deadline(deadline) => Instant::now() >= deadline,
        }
    }

    /// Get the slot ordinal.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("slot", &self.slot)
            .field("rate_limiter", &self.rate_limiter)
            .field("stop_condition", &self.stop_condition)
            .finish()
    }
}
