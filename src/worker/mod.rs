//! Connection worker module
//!
//! The Worker is the core execution unit: it owns one connection slot and
//! runs the simple but critical loop **connect -> send -> classify ->
//! close -> repeat** until its stop condition holds.
//!
//! Each Worker is an independent tokio task that:
//!
//! 1. Opens a fresh connection bounded by the connect timeout
//! 2. Sends exactly one request on it
//! 3. Awaits the classified outcome and updates the shared metrics
//! 4. Optionally applies per-connection rate-limit pacing
//! 5. Closes the connection and repeats until budget or deadline
//!
//! Workers never communicate with each other; the metrics aggregator is
//! the only shared mutable state, and it only ever sees atomic increments.
//!
//! # Example
//!
//! ```ignore
//! use volley::worker::{StopCondition, WorkerBuilder};
//!
//! let worker = WorkerBuilder::new(1)
//!     .client(client)
//!     .metrics(metrics)
//!     .rate_limit(Some(50.0))
//!     .stop_condition(StopCondition::RequestCount(100))
//!     .build()?;
//!
//! let stats = worker.run().await;
//! println!("sent: {}", stats.requests_sent);
//! ```

mod builder;
mod executor;
mod rate_limiter;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::{StopCondition, Worker};
pub use rate_limiter::RequestRateLimiter;
pub use stats::WorkerStats;
