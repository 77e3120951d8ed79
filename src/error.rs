//! Error taxonomy for individual HTTP exchanges
//!
//! Exchange errors are never fatal: the owning worker records a failure,
//! logs the classification, and keeps looping. Fatal configuration errors
//! live in [`crate::config::ConfigError`] and are surfaced before any
//! worker is spawned.

use std::fmt;
use std::io;

use thiserror::Error;

/// Classification of a failed connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// The target actively refused the connection.
    Refused,
    /// The connect did not complete within the configured timeout.
    TimedOut,
    /// The local ephemeral port/address space is exhausted.
    AddrExhausted,
    /// The connection was reset or aborted while being established.
    Reset,
    /// Any other I/O failure.
    Other,
}

impl ConnectErrorKind {
    /// Classify a raw I/O error from a connect attempt.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Self::Refused,
            io::ErrorKind::TimedOut => Self::TimedOut,
            io::ErrorKind::AddrNotAvailable | io::ErrorKind::AddrInUse => Self::AddrExhausted,
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => Self::Reset,
            _ => Self::Other,
        }
    }

    /// True when the cause points at local port/address depletion rather
    /// than at the target.
    pub fn is_addr_exhaustion(&self) -> bool {
        matches!(self, Self::AddrExhausted)
    }

    /// Short label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Refused => "refused",
            Self::TimedOut => "timeout",
            Self::AddrExhausted => "addr-exhausted",
            Self::Reset => "reset",
            Self::Other => "io",
        }
    }
}

impl fmt::Display for ConnectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error raised by a single connect/send/classify cycle.
///
/// `Connect` means the connection never came up and nothing was sent.
/// `Transport` means the request was already dispatched when the exchange
/// died; `bytes_received` holds whatever part of the response had arrived.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The connection could not be established.
    #[error("connect failed ({kind}): {message}")]
    Connect {
        /// Failure classification.
        kind: ConnectErrorKind,
        /// Underlying cause.
        message: String,
    },

    /// The live exchange failed after the request went out.
    #[error("transport error after {bytes_received} response bytes: {message}")]
    Transport {
        /// Response bytes received before the failure.
        bytes_received: u64,
        /// Underlying cause.
        message: String,
    },
}

impl ExchangeError {
    /// Build a connect-phase error from a raw I/O failure.
    pub fn connect_io(err: &io::Error) -> Self {
        Self::Connect {
            kind: ConnectErrorKind::from_io(err),
            message: err.to_string(),
        }
    }

    /// Build a transport-phase error with the partial byte count.
    pub fn transport(bytes_received: u64, message: impl Into<String>) -> Self {
        Self::Transport {
            bytes_received,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_kind_from_io() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(ConnectErrorKind::from_io(&refused), ConnectErrorKind::Refused);

        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert_eq!(ConnectErrorKind::from_io(&timed_out), ConnectErrorKind::TimedOut);

        let no_addr = io::Error::new(io::ErrorKind::AddrNotAvailable, "out of ports");
        assert_eq!(
            ConnectErrorKind::from_io(&no_addr),
            ConnectErrorKind::AddrExhausted
        );

        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        assert_eq!(ConnectErrorKind::from_io(&reset), ConnectErrorKind::Reset);

        let other = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(ConnectErrorKind::from_io(&other), ConnectErrorKind::Other);
    }

    #[test]
    fn test_addr_exhaustion_hint() {
        assert!(ConnectErrorKind::AddrExhausted.is_addr_exhaustion());
        assert!(!ConnectErrorKind::Refused.is_addr_exhaustion());
        assert!(!ConnectErrorKind::TimedOut.is_addr_exhaustion());
    }

    #[test]
    fn test_exchange_error_display() {
        let err = ExchangeError::Connect {
            kind: ConnectErrorKind::Refused,
            message: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "connect failed (refused): connection refused");

        let err = ExchangeError::transport(42, "peer reset");
        assert_eq!(
            err.to_string(),
            "transport error after 42 response bytes: peer reset"
        );
    }
}
