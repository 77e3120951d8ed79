//! Response classification
//!
//! One [`ResponseClassifier`] lives for exactly one exchange. The
//! transport layer drives it with plain method calls: `on_status` once
//! when the status line arrives, `on_chunk` per body frame, and `finish`
//! to consume it into the single terminal [`Outcome`].

use http::StatusCode;

/// Terminal classification of one HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The exchange completed with a 2xx status.
    Success {
        /// Body bytes received.
        bytes_received: u64,
    },
    /// Anything else: non-2xx status, or a failed exchange.
    Failure {
        /// Body bytes received before the exchange ended.
        bytes_received: u64,
    },
}

impl Outcome {
    /// Whether this outcome counts as a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Body bytes received during the exchange.
    pub fn bytes_received(&self) -> u64 {
        match *self {
            Outcome::Success { bytes_received } | Outcome::Failure { bytes_received } => {
                bytes_received
            }
        }
    }
}

/// Per-exchange state: one classification plus the running byte count.
#[derive(Debug, Default)]
pub struct ResponseClassifier {
    success: Option<bool>,
    bytes_received: u64,
}

impl ResponseClassifier {
    /// Fresh state for a new exchange.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the status line: 2xx is a success, anything else a failure.
    pub fn on_status(&mut self, status: StatusCode) {
        self.success = Some(status.is_success());
    }

    /// Account one body chunk.
    pub fn on_chunk(&mut self, len: usize) {
        self.bytes_received += len as u64;
    }

    /// Body bytes seen so far; used when a transport error cuts the
    /// exchange short.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    /// Consume the exchange state into its terminal outcome.
    ///
    /// An exchange that never saw a status line is a failure.
    pub fn finish(self) -> Outcome {
        match self.success {
            Some(true) => Outcome::Success {
                bytes_received: self.bytes_received,
            },
            _ => Outcome::Failure {
                bytes_received: self.bytes_received,
            },
        }
    }
}
