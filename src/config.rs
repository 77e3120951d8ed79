//! Load configuration types
//!
//! A [`LoadConfig`] is built once from the CLI, validated, and never
//! mutated afterwards. Everything downstream (target resolution, request
//! template, workers) derives from this one immutable value.

use std::time::Duration;

use bytes::Bytes;
use http::Method;

/// Load configuration
///
/// Defines the complete load profile for one run: the target, how many
/// connection slots to drive, when each slot stops, and how requests are
/// shaped and paced.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Raw target URL.
    pub target: String,

    /// Explicit port override; wins over the URL port and scheme defaults.
    pub port: Option<u16>,

    /// Number of concurrent connection slots.
    pub connections: usize,

    /// Requests per connection (request-count mode).
    pub requests: u64,

    /// HTTP method for every request.
    pub method: Method,

    /// Request body; only attached for methods that carry one.
    pub body: Bytes,

    /// Raw `Name: Value` header strings, applied in order after the
    /// baseline headers.
    pub headers: Vec<String>,

    /// Connect timeout per attempt.
    pub connect_timeout: Duration,

    /// I/O worker-thread count for the shared runtime.
    pub threads: usize,

    /// Optional per-connection rate limit (requests/second).
    pub rate_limit: Option<f64>,

    /// Optional wall-clock duration; when set, it overrides the
    /// per-connection request budget and slots stop at the deadline.
    pub duration: Option<Duration>,
}

impl LoadConfig {
    /// Create a config for `target` with the standard defaults.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            port: None,
            connections: 100,
            requests: 100,
            method: Method::GET,
            body: Bytes::new(),
            headers: Vec::new(),
            connect_timeout: Duration::from_millis(5000),
            threads: default_thread_count(),
            rate_limit: None,
            duration: None,
        }
    }

    /// Set the connection count.
    pub fn with_connections(mut self, connections: usize) -> Self {
        self.connections = connections;
        self
    }

    /// Set the per-connection request budget.
    pub fn with_requests(mut self, requests: u64) -> Self {
        self.requests = requests;
        self
    }

    /// Set the per-connection rate limit.
    pub fn with_rate_limit(mut self, rps: f64) -> Self {
        self.rate_limit = Some(rps);
        self
    }

    /// Switch to duration mode.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connections == 0 {
            return Err(ConfigError::InvalidConnections(
                "connection count must be at least 1".into(),
            ));
        }

        if let Some(rps) = self.rate_limit {
            if rps <= 0.0 {
                return Err(ConfigError::InvalidRateLimit(
                    "rate limit must be positive".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Default size of the shared I/O pool: twice the available cores.
///
/// Computed once at startup by the CLI layer; not read as ambient state
/// anywhere else.
pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(8)
}

/// Configuration validation errors
///
/// All of these are fatal: they are surfaced once, before any worker is
/// spawned, and terminate the process with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The target URL could not be parsed or has no host.
    #[error("invalid target URL: {0}")]
    InvalidTarget(String),

    /// Invalid connection count.
    #[error("invalid connection count: {0}")]
    InvalidConnections(String),

    /// Invalid rate limit.
    #[error("invalid rate limit: {0}")]
    InvalidRateLimit(String),

    /// Unrecognized HTTP method.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// A required worker field was not supplied at construction.
    #[error("missing worker configuration: {0}")]
    MissingField(&'static str),
}
