//! HTTP request/response data and the transport that executes them.
//!
//! # Design
//! Requests and responses are plain data. `HandleClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and returns whatever
//! `HttpResponse` comes back. Keeping the transport behind a trait lets tests
//! record requests without a network, while `UreqTransport` does real I/O.
//!
//! All fields use owned types (`String`, `Vec`) so values can be stored and
//! compared freely in tests.

use tracing::{debug, trace};
use ureq::tls::TlsConfig;

use crate::error::Result;

/// Ordered list of `(name, value)` header pairs.
pub type Headers = Vec<(String, String)>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Fully-qualified resource URL, without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Headers,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data. The body is returned as-is;
/// nothing in this crate parses or validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Executes one `HttpRequest` and returns the server's response.
///
/// Implementations must hand back non-2xx responses as `Ok`; only failures
/// to complete the exchange are errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    verify_tls: bool,
}

impl UreqTransport {
    /// Build an agent that reports every status as data. When `verify_tls`
    /// is false, certificate verification is disabled.
    pub fn new(verify_tls: bool) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!verify_tls)
                    .build(),
            )
            .build()
            .new_agent();
        Self { agent, verify_tls }
    }

    /// Whether the agent verifies server certificates.
    pub fn verifies_tls(&self) -> bool {
        self.verify_tls
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = ?request.method, url = %request.url, "sending handle request");
        if let Some(body) = &request.body {
            trace!(%body, "request body");
        }

        let mut response = match request.method {
            HttpMethod::Get => with_parts(self.agent.get(&request.url), request).call(),
            HttpMethod::Delete => with_parts(self.agent.delete(&request.url), request).call(),
            HttpMethod::Put => {
                let builder = with_parts(self.agent.put(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string()?;

        debug!(status, url = %request.url, "received handle response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Copy headers and query parameters onto a ureq request builder.
fn with_parts<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (name, value) in &request.query {
        builder = builder.query(name, value);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: String::new(),
        };
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("Authorization"), None);
    }

    #[test]
    fn success_covers_2xx_only() {
        let mut response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 404;
        assert!(!response.is_success());
        response.status = 302;
        assert!(!response.is_success());
    }
}
