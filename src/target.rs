//! Target URL resolution
//!
//! Parses the raw target URL once into the pieces every exchange needs:
//! scheme, host, resolved port, and the origin-form path+query.

use http::Uri;

use crate::config::ConfigError;

/// Parsed, resolved view of the target URL.
///
/// Derived once from the load configuration and read-only thereafter.
/// Port resolution: an explicit override wins, then the URL's own port,
/// then 443 for https and 80 for everything else. An empty path becomes
/// `/`; a query string is kept appended as `?<query>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    scheme: String,
    host: String,
    port: u16,
    path_and_query: String,
}

impl TargetDescriptor {
    /// Parse `raw` and resolve the port and path defaults.
    pub fn parse(raw: &str, port_override: Option<u16>) -> Result<Self, ConfigError> {
        let uri: Uri = raw
            .parse()
            .map_err(|e| ConfigError::InvalidTarget(format!("{raw}: {e}")))?;

        let host = uri
            .host()
            .ok_or_else(|| ConfigError::InvalidTarget(format!("{raw}: missing host")))?
            .to_string();

        let scheme = uri.scheme_str().unwrap_or("http").to_string();

        let port = port_override
            .or_else(|| uri.port_u16())
            .unwrap_or(if scheme == "https" { 443 } else { 80 });

        let path_and_query = match uri.path_and_query() {
            Some(pq) if !pq.as_str().is_empty() => pq.as_str().to_string(),
            _ => "/".to_string(),
        };

        Ok(Self {
            scheme,
            host,
            port,
            path_and_query,
        })
    }

    /// URL scheme (`http` or `https`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Target host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Resolved port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Origin-form path plus query, never empty.
    pub fn path_and_query(&self) -> &str {
        &self.path_and_query
    }

    /// `(host, port)` pair for connecting.
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}
