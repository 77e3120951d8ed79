//! volley - concurrent HTTP load generator

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use volley::cli::Cli;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments before the runtime exists; -h/-V exit here.
    let cli = Cli::parse();

    // The shared I/O pool every connection worker runs on, sized from the
    // CLI independently of the connection count.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cli.threads.max(1))
        .enable_all()
        .build()?;

    let result = runtime.block_on(cli.run());

    // Bounded grace period for in-flight connection tasks.
    runtime.shutdown_timeout(Duration::from_secs(1));

    result
}
