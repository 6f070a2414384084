//! Success/failure classification of HTTP responses.
//!
//! # Design
//! Only `200..=299` counts as success. Redirects are failures too because
//! the core never follows them. A failure carries the status, parsed headers
//! and raw body; no finer subtype is derived from the status code.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorKind};
use crate::headers::{parse_headers, HttpHeaders};
use crate::http::HttpResponse;

/// Whether `status` is a success code.
pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// A classified response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome {
    Success {
        status: u16,
        headers: HttpHeaders,
        body: String,
    },
    Failure {
        status: u16,
        headers: HttpHeaders,
        body: String,
        kind: ErrorKind,
    },
}

/// Classify a response from its status code.
pub fn classify(status: u16, headers: HttpHeaders, body: String) -> HttpOutcome {
    if is_success(status) {
        HttpOutcome::Success {
            status,
            headers,
            body,
        }
    } else {
        HttpOutcome::Failure {
            status,
            headers,
            body,
            kind: ErrorKind::InvalidHttpResponseCode,
        }
    }
}

/// Parse the raw header block of `response` and classify it.
pub fn classify_response(response: HttpResponse) -> HttpOutcome {
    let headers = parse_headers(&response.raw_headers);
    classify(response.status, headers, response.body)
}

impl HttpOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HttpOutcome::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            HttpOutcome::Success { status, .. } | HttpOutcome::Failure { status, .. } => *status,
        }
    }

    pub fn into_result(self) -> Result<ApiResponse, ApiError> {
        match self {
            HttpOutcome::Success {
                status,
                headers,
                body,
            } => Ok(ApiResponse {
                status,
                headers,
                body,
            }),
            HttpOutcome::Failure {
                status,
                headers,
                body,
                ..
            } => Err(ApiError::InvalidHttpResponseCode {
                status,
                headers,
                body,
            }),
        }
    }
}

/// A successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HttpHeaders,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}
