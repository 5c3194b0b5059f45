//! HTTP request/response values and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `Client` builds an `HttpRequest`,
//! hands it to a `Transport`, and decodes the returned bytes. The default
//! transport is a `ureq::Agent`; tests and callers with special needs plug in
//! their own implementation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;

use crate::error::{ClientError, Result};

/// Timeout applied to the agent `Client::new` builds when none is supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method tokens are case-sensitive.
impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            other => Err(ClientError::RequestConstructionError(format!(
                "invalid method {other:?}"
            ))),
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as returned by a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes `HttpRequest`s. Implementations must be shareable across threads
/// and must report failures as `TransportError` / `ReadError` instead of
/// panicking.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Build the agent used when the caller does not provide a transport.
///
/// HTTP error statuses are returned as data: the API reports failures inside
/// the JSON envelope, often alongside a 4xx status.
pub fn default_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for ureq::Agent {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let url = request.url.as_str();
        let body = request.body.as_deref().map(str::as_bytes);
        let result = match (request.method, body) {
            (HttpMethod::Get, None) => with_headers(self.get(url), &request.headers).call(),
            (HttpMethod::Get, Some(body)) => with_headers(self.get(url), &request.headers)
                .force_send_body()
                .send(body),
            (HttpMethod::Delete, None) => with_headers(self.delete(url), &request.headers).call(),
            (HttpMethod::Delete, Some(body)) => with_headers(self.delete(url), &request.headers)
                .force_send_body()
                .send(body),
            (HttpMethod::Post, body) => {
                with_headers(self.post(url), &request.headers).send(body.unwrap_or_default())
            }
            (HttpMethod::Put, body) => {
                with_headers(self.put(url), &request.headers).send(body.unwrap_or_default())
            }
            (HttpMethod::Patch, body) => {
                with_headers(self.patch(url), &request.headers).send(body.unwrap_or_default())
            }
        };
        let mut response = result.map_err(|e| ClientError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ClientError::ReadError(e.to_string()))?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body })
    }
}
