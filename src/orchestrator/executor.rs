//! Orchestrator execution logic

use std::sync::Arc;
use std::time::Instant;

use crate::client::{ExchangeClient, HttpExchangeClient};
use crate::config::{ConfigError, LoadConfig};
use crate::metrics::Metrics;
use crate::request::RequestTemplate;
use crate::target::TargetDescriptor;
use crate::worker::{StopCondition, WorkerBuilder};

use super::report::RunReport;

/// Orchestrator manages the run lifecycle.
///
/// Responsible for validating the configuration, spawning one worker per
/// connection slot, holding the join barrier, and producing the final
/// report.
pub struct Orchestrator {
    config: LoadConfig,
    metrics: Arc<Metrics>,
}

impl Orchestrator {
    /// Create a new orchestrator with fresh metrics.
    pub fn new(config: LoadConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Handle to the shared metrics aggregator.
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Get the load configuration.
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Run the full load: spawn all slots, wait for every one of them to
    /// close, and render the report.
    ///
    /// Request-level failures are statistics, not errors; this only fails
    /// on configuration problems surfaced before any worker is spawned.
    pub async fn run(&self) -> Result<RunReport, ConfigError> {
        self.config.validate()?;

        let target = TargetDescriptor::parse(&self.config.target, self.config.port)?;
        let template = RequestTemplate::new(
            &target,
            self.config.method.clone(),
            self.config.body.clone(),
            &self.config.headers,
        )?;

        tracing::info!(
            host = target.host(),
            port = target.port(),
            path = target.path_and_query(),
            connections = self.config.connections,
            method = %self.config.method,
            rate_limit = ?self.config.rate_limit,
            "starting load"
        );

        let client: Arc<dyn ExchangeClient> = Arc::new(HttpExchangeClient::new(
            target,
            template,
            self.config.connect_timeout,
        ));

        let start = Instant::now();
        let stop_condition = match self.config.duration {
            Some(duration) => {
                tracing::info!(duration_secs = duration.as_secs_f64(), "duration mode");
                StopCondition::Deadline(start + duration)
            }
            None => {
                tracing::info!(requests = self.config.requests, "request-count mode");
                StopCondition::RequestCount(self.config.requests)
            }
        };

        let mut handles = Vec::with_capacity(self.config.connections);
        for slot in 1..=self.config.connections {
            let worker = WorkerBuilder::new(slot)
                .client(Arc::clone(&client))
                .metrics(Arc::clone(&self.metrics))
                .rate_limit(self.config.rate_limit)
                .stop_condition(stop_condition)
                .build()?;

            handles.push(tokio::spawn(worker.run()));
        }

        // Join barrier: the run is not complete until every slot has
        // closed, even past a duration deadline; in-flight exchanges are
        // allowed to finish.
        for (idx, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(stats) => {
                    tracing::debug!(
                        slot = idx + 1,
                        sent = stats.requests_sent,
                        succeeded = stats.succeeded,
                        failed = stats.failed,
                        "slot closed"
                    );
                }
                Err(err) => {
                    tracing::error!(slot = idx + 1, error = %err, "worker task panicked");
                }
            }
        }

        let elapsed = start.elapsed();
        let report = RunReport::new(self.metrics.snapshot(), elapsed);

        tracing::info!(
            elapsed_secs = elapsed.as_secs_f64(),
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            rps = report.requests_per_second,
            "run completed"
        );

        Ok(report)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .finish()
    }
}
