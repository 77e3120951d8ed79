//! CLI argument parsing and run handling

use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use clap::Parser;
use http::Method;

use crate::config::{default_thread_count, ConfigError, LoadConfig};
use crate::orchestrator::{Orchestrator, RunReport};

/// volley - concurrent HTTP load generator
#[derive(Parser, Debug)]
#[command(name = "volley")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target URL
    #[arg(short = 't', long)]
    pub target: String,

    /// Port override (defaults to the URL port, then 80/443 by scheme)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Number of concurrent connections
    #[arg(short = 'c', long, default_value_t = 100)]
    pub connections: usize,

    /// Requests per connection
    #[arg(short = 'r', long, default_value_t = 100)]
    pub requests: u64,

    /// HTTP method
    #[arg(short = 'm', long, default_value = "GET")]
    pub method: String,

    /// Request body for methods that carry one
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Raw "Name: Value" header; repeatable
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Connect timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout: u64,

    /// I/O worker-thread count
    #[arg(long, default_value_t = default_thread_count())]
    pub threads: usize,

    /// Per-connection rate limit in requests/second
    #[arg(long)]
    pub rate_limit: Option<f64>,

    /// Test duration in seconds; overrides -r when set
    #[arg(long)]
    pub duration: Option<u64>,
}

impl Cli {
    /// Materialize the immutable load configuration.
    pub fn load_config(&self) -> Result<LoadConfig, ConfigError> {
        let method = Method::from_bytes(self.method.to_uppercase().as_bytes())
            .map_err(|_| ConfigError::InvalidMethod(self.method.clone()))?;

        let config = LoadConfig {
            target: self.target.clone(),
            port: self.port,
            connections: self.connections,
            requests: self.requests,
            method,
            body: Bytes::from(self.data.clone().unwrap_or_default()),
            headers: self.headers.clone(),
            connect_timeout: Duration::from_millis(self.timeout),
            threads: self.threads,
            rate_limit: self.rate_limit,
            duration: self.duration.map(Duration::from_secs),
        };

        config.validate()?;
        Ok(config)
    }

    /// Run the load against the target and print the final report.
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        self.print_banner(&config);

        let orchestrator = Orchestrator::new(config);
        let report = orchestrator.run().await?;

        self.print_report(&report);

        Ok(())
    }

    fn print_banner(&self, config: &LoadConfig) {
        println!("\n{}", "=".repeat(60));
        println!("   volley - HTTP load generator");
        println!("{}", "=".repeat(60));
        println!();
        println!("Configuration:");
        println!("  Target:       {}", config.target);
        println!("  Connections:  {}", config.connections);
        match config.duration {
            Some(duration) => println!("  Duration:     {} s", duration.as_secs()),
            None => println!("  Requests:     {} per connection", config.requests),
        }
        println!("  Method:       {}", config.method);
        if let Some(rate) = config.rate_limit {
            println!("  Rate limit:   {} req/s per connection", rate);
        }
        println!("  Timeout:      {} ms", config.connect_timeout.as_millis());
        println!("  I/O threads:  {}", config.threads);
        println!("{}", "=".repeat(60));
        println!();
    }

    fn print_report(&self, report: &RunReport) {
        println!();
        println!("{}", "=".repeat(60));
        println!("   Results");
        println!("{}", "=".repeat(60));
        println!();
        println!("  Elapsed:           {:.2} s", report.elapsed.as_secs_f64());
        println!("  Total requests:    {}", report.total);
        println!("  Succeeded:         {}", report.succeeded);
        println!("  Failed:            {}", report.failed);
        println!("  Requests/second:   {:.2}", report.requests_per_second);
        println!("  KB sent:           {:.2}", report.kb_sent);
        println!("  KB received:       {:.2}", report.kb_received);
        println!("{}", "=".repeat(60));
        println!();
    }
}
