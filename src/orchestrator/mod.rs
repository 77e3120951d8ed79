//! Orchestrator for run lifecycle management
//!
//! The Orchestrator coordinates the complete load run:
//! - Deriving the target, request template, and stop condition from the
//!   immutable configuration
//! - Spawning one worker task per connection slot
//! - Holding the join barrier: the run is not complete until every slot
//!   has reached its terminal state, even past a duration deadline
//! - Rendering the final report from the metrics snapshot
//!
//! # Example
//!
//! ```ignore
//! use volley::{LoadConfig, Orchestrator};
//!
//! let config = LoadConfig::new("http://127.0.0.1:8080/")
//!     .with_connections(10)
//!     .with_requests(100);
//!
//! let report = Orchestrator::new(config).run().await?;
//! println!("{:.1} req/s", report.requests_per_second);
//! ```

mod executor;
mod report;

pub use executor::Orchestrator;
pub use report::RunReport;

#[cfg(test)]
mod tests;
