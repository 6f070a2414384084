//! Synchronous client core for the SoundCloud API.
//!
//! # Overview
//! Builds authenticated `HttpRequest` values and classifies `HttpResponse`
//! values without touching the network (host-does-IO pattern). The caller
//! executes the actual HTTP round-trip, making the core deterministic and
//! testable.
//!
//! # Design
//! - `SoundCloudClient` holds only its `ClientConfig`; every call is a fresh
//!   build or classify step. No retries, no caching.
//! - URL assembly, OAuth2 URLs, header parsing, format negotiation and MIME
//!   lookup live in small modules that can be used on their own.
//! - Any status outside `200..=299` is an `ApiError::InvalidHttpResponseCode`
//!   carrying status, parsed headers and body.
//! - Request/response types use owned `String` / `Vec` fields so they can be
//!   handed to any transport.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod headers;
pub mod http;
pub mod mime;
pub mod oauth;
pub mod response;

/// Library version, `major.minor.patch`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity string sent as `User-Agent`.
pub const USER_AGENT: &str = concat!("PHP-SoundCloud/", env!("CARGO_PKG_VERSION"));

pub use client::SoundCloudClient;
pub use config::ClientConfig;
pub use endpoint::{UrlBuilder, API_VERSION};
pub use error::{ApiError, ErrorKind};
pub use format::ResponseFormat;
pub use headers::{parse_headers, parse_status_code, HttpHeaders};
pub use http::{HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, Transport};
pub use mime::audio_mime_type;
pub use oauth::{AccessToken, Grant, OAuthFlow, ACCESS_TOKEN_URL};
pub use response::{classify, is_success, ApiResponse, HttpOutcome};
