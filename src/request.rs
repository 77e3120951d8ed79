//! Outbound request construction
//!
//! A [`RequestTemplate`] is built once from the configuration and stamps
//! out one identical `http::Request` per send. Baseline headers go in
//! first (`Host`, `Connection: close`, `User-Agent`), then method-specific
//! content headers, then the user's raw headers, which overwrite on a name
//! collision.

use bytes::Bytes;
use http::header::{
    HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, HOST, USER_AGENT,
};
use http::{Method, Request, Uri};
use http_body_util::Full;

use crate::config::ConfigError;
use crate::target::TargetDescriptor;

/// Tool identifier sent as the baseline `User-Agent`.
const USER_AGENT_VALUE: &str = concat!("volley/", env!("CARGO_PKG_VERSION"));

/// Immutable per-run request template.
///
/// Only POST attaches the configured body (with an exact `Content-Length`
/// and a default form `Content-Type`); every other method is passed
/// through verbatim with no implicit body handling. A raw header string
/// without a colon is dropped silently rather than failing the run.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestTemplate {
    /// Build the template from the resolved target and request shape.
    pub fn new(
        target: &TargetDescriptor,
        method: Method,
        body: Bytes,
        raw_headers: &[String],
    ) -> Result<Self, ConfigError> {
        let uri: Uri = target
            .path_and_query()
            .parse()
            .map_err(|e| ConfigError::InvalidTarget(format!("{}: {e}", target.path_and_query())))?;

        let body = if method == Method::POST {
            body
        } else {
            Bytes::new()
        };

        let mut headers = HeaderMap::new();
        let host = HeaderValue::from_str(target.host())
            .map_err(|_| ConfigError::InvalidTarget(format!("{}: bad host", target.host())))?;
        headers.insert(HOST, host);
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if method == Method::POST {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len() as u64));
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
        }

        for raw in raw_headers {
            let Some((name, value)) = raw.split_once(':') else {
                tracing::debug!(header = %raw, "skipping header without a colon");
                continue;
            };
            match (
                HeaderName::from_bytes(name.trim().as_bytes()),
                HeaderValue::from_str(value.trim()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::debug!(header = %raw, "skipping unparseable header"),
            }
        }

        Ok(Self {
            method,
            uri,
            headers,
            body,
        })
    }

    /// Stamp out one request for the next send.
    pub fn build(&self) -> Request<Full<Bytes>> {
        let mut request = Request::new(Full::new(self.body.clone()));
        *request.method_mut() = self.method.clone();
        *request.uri_mut() = self.uri.clone();
        *request.headers_mut() = self.headers.clone();
        request
    }

    /// HTTP method used by every request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Final header set after baseline/custom merging.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body bytes dispatched with each request.
    pub fn body_len(&self) -> u64 {
        self.body.len() as u64
    }
}
