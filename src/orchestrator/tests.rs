//! End-to-end tests for the Orchestrator against local fixture servers

use super::*;
use crate::config::{ConfigError, LoadConfig};

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ============================================================================
// Fixture server
// ============================================================================

/// Answers every connection with `response` once the request head has
/// arrived, then closes, matching the engine's one-shot connection model.
async fn spawn_fixture(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fixture");
    let addr = listener.local_addr().expect("fixture addr");
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            head.extend_from_slice(&buf[..n]);
                            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    addr
}

const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
const NOT_FOUND_RESPONSE: &str =
    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

fn config_for(addr: SocketAddr) -> LoadConfig {
    LoadConfig::new(format!("http://{addr}/"))
        .with_connections(1)
        .with_requests(1)
}

// ============================================================================
// End-to-end tests
// ============================================================================

#[tokio::test]
async fn test_single_request_run() {
    let addr = spawn_fixture(OK_RESPONSE).await;
    let orchestrator = Orchestrator::new(config_for(addr));

    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.total, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);
    assert!(report.requests_per_second > 0.0);
    assert!(report.kb_received > 0.0);
}

#[tokio::test]
async fn test_totals_equal_connections_times_requests() {
    let addr = spawn_fixture(OK_RESPONSE).await;
    let config = config_for(addr).with_connections(2).with_requests(3);
    let orchestrator = Orchestrator::new(config);

    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.total, 6);
    assert_eq!(report.succeeded, 6);
    assert_eq!(report.failed, 0);
    assert_eq!(report.succeeded + report.failed, report.total);
}

#[tokio::test]
async fn test_unreachable_target_counts_failures_and_completes() {
    // Nothing listens on port 1; every attempt is a connection failure,
    // the run still completes normally.
    let mut config = LoadConfig::new("http://127.0.0.1:1/")
        .with_connections(1)
        .with_requests(3);
    config.connect_timeout = Duration::from_millis(500);
    let orchestrator = Orchestrator::new(config);

    let report = orchestrator.run().await.expect("run completes");

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 3);
}

#[tokio::test]
async fn test_invalid_target_rejected_before_any_worker() {
    let orchestrator = Orchestrator::new(LoadConfig::new("not a url"));
    let metrics = orchestrator.metrics();

    let err = orchestrator.run().await.expect_err("must fail");
    assert!(matches!(err, ConfigError::InvalidTarget(_)));

    // Zero requests attempted.
    assert_eq!(metrics.snapshot().total(), 0);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = LoadConfig::new("http://127.0.0.1:1/").with_connections(0);
    let err = Orchestrator::new(config).run().await.expect_err("must fail");
    assert!(matches!(err, ConfigError::InvalidConnections(_)));
}

#[tokio::test]
async fn test_non_2xx_counted_as_failure() {
    let addr = spawn_fixture(NOT_FOUND_RESPONSE).await;
    let config = config_for(addr).with_requests(2);
    let orchestrator = Orchestrator::new(config);

    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.total, 2);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 2);
}

#[tokio::test]
async fn test_duration_mode_completes() {
    let addr = spawn_fixture(OK_RESPONSE).await;
    let config = config_for(addr).with_duration(Duration::from_millis(200));
    let orchestrator = Orchestrator::new(config);

    let start = std::time::Instant::now();
    let report = orchestrator.run().await.expect("run");

    assert!(start.elapsed() >= Duration::from_millis(200));
    assert!(report.total >= 1);
    assert_eq!(report.succeeded + report.failed, report.total);
}

#[tokio::test]
async fn test_bytes_sent_accounts_post_bodies() {
    let addr = spawn_fixture(OK_RESPONSE).await;
    let mut config = config_for(addr).with_requests(4);
    config.method = http::Method::POST;
    config.body = bytes::Bytes::from_static(b"a=1&b=2");
    let orchestrator = Orchestrator::new(config);
    let metrics = orchestrator.metrics();

    let report = orchestrator.run().await.expect("run");

    assert_eq!(report.total, 4);
    assert_eq!(metrics.snapshot().bytes_sent, 4 * 7);
}
