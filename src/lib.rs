//! volley: concurrent HTTP load-generation engine
//!
//! Given a target URL and a load profile, volley drives many independent
//! client connections against the target, classifies each response, and
//! produces aggregate throughput/error statistics.
//!
//! # Architecture
//!
//! - **Target**: parses the target URL into scheme/host/port/path once
//! - **Request**: stamps out one identical request per send
//! - **Classifier**: turns one exchange into exactly one outcome
//! - **Client**: one-shot HTTP/1.1 connection per exchange
//! - **Worker**: owns one connection slot and its request loop
//! - **Metrics**: atomic counters shared by every worker
//! - **Orchestrator**: spawns all slots, holds the join barrier, reports
//!
//! Each exchange uses a fresh connection (`Connection: close`); there is
//! no pooling, no keep-alive, and no retry. A failure on one slot never
//! affects another slot or the run as a whole.
//!
//! # Example
//!
//! ```rust,no_run
//! use volley::{LoadConfig, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LoadConfig::new("http://127.0.0.1:8080/")
//!         .with_connections(10)
//!         .with_requests(100);
//!
//!     let report = Orchestrator::new(config).run().await?;
//!     println!(
//!         "{} requests at {:.1} req/s",
//!         report.total, report.requests_per_second
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod request;
pub mod target;
pub mod worker;

pub use classifier::{Outcome, ResponseClassifier};
pub use client::{ExchangeClient, HttpExchangeClient};
pub use config::{ConfigError, LoadConfig};
pub use error::{ConnectErrorKind, ExchangeError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use orchestrator::{Orchestrator, RunReport};
pub use request::RequestTemplate;
pub use target::TargetDescriptor;
pub use worker::{RequestRateLimiter, StopCondition, Worker, WorkerBuilder, WorkerStats};
