//! Builder pattern for Worker construction

use std::sync::Arc;

use crate::client::ExchangeClient;
use crate::config::ConfigError;
use crate::metrics::Metrics;

use super::executor::{StopCondition, Worker};
use super::rate_limiter::RequestRateLimiter;

/// Builder for creating Worker instances.
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(1)
///     .client(client)
///     .metrics(metrics)
///     .rate_limit(Some(50.0))
///     .stop_condition(StopCondition::RequestCount(100))
///     .build()?;
/// ```
pub struct WorkerBuilder {
    slot: usize,
    client: Option<Arc<dyn ExchangeClient>>,
    metrics: Option<Arc<Metrics>>,
    rate_limit: Option<f64>,
    stop_condition: Option<StopCondition>,
}

impl WorkerBuilder {
    /// Create a new builder for the given slot ordinal.
    pub fn new(slot: usize) -> Self {
        Self {
            slot,
            client: None,
            metrics: None,
            rate_limit: None,
            stop_condition: None,
        }
    }

    /// Set the exchange client.
    pub fn client(mut self, client: Arc<dyn ExchangeClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the shared metrics aggregator.
    pub fn metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Set the per-connection rate limit (requests per second).
    pub fn rate_limit(mut self, rps: Option<f64>) -> Self {
        self.rate_limit = rps;
        self
    }

    /// Set the stop condition.
    pub fn stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = Some(condition);
        self
    }

    /// Build the Worker.
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> Result<Worker, ConfigError> {
        let client = self.client.ok_or(ConfigError::MissingField("client"))?;
        let metrics = self.metrics.ok_or(ConfigError::MissingField("metrics"))?;
        let stop_condition = self
            .stop_condition
            .ok_or(ConfigError::MissingField("stop_condition"))?;

        let rate_limiter = RequestRateLimiter::new(self.rate_limit);

        Ok(Worker::new(
            self.slot,
            client,
            metrics,
            rate_limiter,
            stop_condition,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_missing_client() {
        let result = WorkerBuilder::new(1)
            .metrics(Arc::new(Metrics::new()))
            .stop_condition(StopCondition::RequestCount(10))
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingField("client"))
        ));
    }

    #[test]
    fn test_builder_missing_stop_condition() {
        let result = WorkerBuilder::new(1)
            .metrics(Arc::new(Metrics::new()))
            .build();

        assert!(result.is_err());
    }
}
