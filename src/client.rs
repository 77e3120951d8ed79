//! One-shot HTTP exchange transport
//!
//! Every exchange opens its own TCP connection, performs a single
//! HTTP/1.1 request/response cycle, and drops the connection. There is no
//! pooling and no keep-alive; `Connection: close` is part of the baseline
//! request headers.
//!
//! The [`ExchangeClient`] trait is the seam between the worker loop and
//! the transport, so worker behavior is testable against mocks.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::classifier::{Outcome, ResponseClassifier};
use crate::error::{ConnectErrorKind, ExchangeError};
use crate::request::RequestTemplate;
use crate::target::TargetDescriptor;

/// Executes one complete connect/send/classify cycle per call.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Run one exchange against the target.
    async fn execute(&self) -> Result<Outcome, ExchangeError>;

    /// Body bytes dispatched with every request this client sends.
    fn bytes_per_request(&self) -> u64;
}

/// Production transport: a fresh hyper http1 connection per exchange.
#[derive(Debug)]
pub struct HttpExchangeClient {
    target: TargetDescriptor,
    template: RequestTemplate,
    connect_timeout: Duration,
}

impl HttpExchangeClient {
    /// Build a client for the resolved target.
    pub fn new(
        target: TargetDescriptor,
        template: RequestTemplate,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            target,
            template,
            connect_timeout,
        }
    }

    async fn connect(&self) -> Result<TcpStream, ExchangeError> {
        match timeout(self.connect_timeout, TcpStream::connect(self.target.addr())).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(err)) => Err(ExchangeError::connect_io(&err)),
            Err(_) => Err(ExchangeError::Connect {
                kind: ConnectErrorKind::TimedOut,
                message: format!("no connection within {:?}", self.connect_timeout),
            }),
        }
    }
}

#[async_trait]
impl ExchangeClient for HttpExchangeClient {
    fn bytes_per_request(&self) -> u64 {
        self.template.body_len()
    }

    async fn execute(&self) -> Result<Outcome, ExchangeError> {
        let stream = self.connect().await?;

        let (mut sender, conn) =
            http1::handshake(TokioIo::new(stream))
                .await
                .map_err(|err| ExchangeError::Connect {
                    kind: ConnectErrorKind::Other,
                    message: format!("handshake: {err}"),
                })?;

        // The connection task ends on its own once the one-shot exchange
        // completes and the socket closes.
        tokio::spawn(async move {
            if let Err(err) = conn.await {
                tracing::trace!(error = %err, "connection wound down with error");
            }
        });

        let mut classifier = ResponseClassifier::new();

        let response = match sender.send_request(self.template.build()).await {
            Ok(response) => response,
            Err(err) => {
                return Err(ExchangeError::transport(
                    classifier.bytes_received(),
                    err.to_string(),
                ))
            }
        };

        classifier.on_status(response.status());

        let mut body = response.into_body();
        while let Some(frame) = body.frame().await {
            match frame {
                Ok(frame) => {
                    if let Some(data) = frame.data_ref() {
                        classifier.on_chunk(data.len());
                    }
                }
                Err(err) => {
                    return Err(ExchangeError::transport(
                        classifier.bytes_received(),
                        err.to_string(),
                    ))
                }
            }
        }

        Ok(classifier.finish())
    }
}
