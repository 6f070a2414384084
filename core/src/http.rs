//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and classifies `HttpResponse` values without
//! touching the network; the host executes the round-trip, either by hand or
//! through a `Transport` implementation. Timeouts, TLS and cancellation are
//! entirely the transport's business.
//!
//! All fields use owned types so requests can be queued or moved across
//! threads without lifetime concerns.

use std::fmt;
use std::path::PathBuf;

use crate::error::BoxError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    /// A file read from disk by the transport.
    File {
        name: String,
        path: PathBuf,
        content_type: String,
    },
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Already-encoded `application/x-www-form-urlencoded` body.
    Form(String),
    /// Multipart form; the transport chooses the boundary and encodes it.
    Multipart(Vec<MultipartPart>),
}

/// An HTTP request described as plain data.
///
/// `url` is always absolute. `headers` are ordered and must be sent in that
/// order. `user_agent` identifies the library and is sent as `User-Agent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    pub user_agent: String,
}

impl HttpRequest {
    /// Headers rendered as `Name: value` lines, in order.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect()
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `raw_headers` is the header block as received, starting with the status
/// line; the core parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub raw_headers: String,
    pub body: String,
}

/// Executes requests on behalf of the client.
///
/// Implementations return every response they receive, including 4xx and 5xx;
/// only failures that prevent a response (connection refused, TLS, timeout)
/// are errors. Those are relayed unchanged as `ApiError::TransportFailure`.
pub trait Transport {
    type Error: Into<BoxError>;

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Self::Error>;
}
