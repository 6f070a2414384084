//! Error types for the SoundCloud API client core.
//!
//! # Design
//! Every failure the core can detect is a variant of a single `ApiError`
//! enum with a kind-specific payload. `ApiError::kind` returns a plain
//! discriminant for callers that only need to branch on the category.
//! Non-2xx responses always land in `InvalidHttpResponseCode` with the status,
//! parsed headers and raw body so the caller can decide what to do next; the
//! core never retries and never logs errors.

use std::error::Error as StdError;

use thiserror::Error;

use crate::headers::HttpHeaders;

/// Boxed error reported by a `Transport` implementation.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors returned by the client core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client id or client secret was empty at construction time.
    #[error("client id and client secret must both be non-empty")]
    MissingClientCredentials,

    /// MIME resolution was requested for an extension outside the audio whitelist.
    #[error("unsupported audio format: {0:?}")]
    UnsupportedAudioFormat(String),

    /// Format negotiation was requested for a token other than `json`, `xml` or `*`.
    #[error("unsupported response format: {0:?}")]
    UnsupportedResponseFormat(String),

    /// The server answered with a status outside `200..=299`.
    #[error("invalid HTTP response code: {status}")]
    InvalidHttpResponseCode {
        status: u16,
        headers: HttpHeaders,
        body: String,
    },

    /// The transport collaborator failed before a response was received.
    #[error("transport failure: {0}")]
    TransportFailure(#[source] BoxError),

    /// An assembled request URL is not an absolute, well-formed URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A configuration value could not be interpreted.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Discriminant of an `ApiError`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingClientCredentials,
    UnsupportedAudioFormat,
    UnsupportedResponseFormat,
    InvalidHttpResponseCode,
    TransportFailure,
    InvalidUrl,
    DeserializationError,
    Configuration,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingClientCredentials => ErrorKind::MissingClientCredentials,
            ApiError::UnsupportedAudioFormat(_) => ErrorKind::UnsupportedAudioFormat,
            ApiError::UnsupportedResponseFormat(_) => ErrorKind::UnsupportedResponseFormat,
            ApiError::InvalidHttpResponseCode { .. } => ErrorKind::InvalidHttpResponseCode,
            ApiError::TransportFailure(_) => ErrorKind::TransportFailure,
            ApiError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            ApiError::DeserializationError(_) => ErrorKind::DeserializationError,
            ApiError::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// HTTP status carried by an `InvalidHttpResponseCode` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidHttpResponseCode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed response headers carried by an `InvalidHttpResponseCode` error.
    pub fn headers(&self) -> Option<&HttpHeaders> {
        match self {
            ApiError::InvalidHttpResponseCode { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// Raw response body carried by an `InvalidHttpResponseCode` error.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::InvalidHttpResponseCode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Look up a single response header; accepts either `Content-Type` or `content_type`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers().and_then(|headers| headers.get(name))
    }
}
