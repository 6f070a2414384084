//! Response format negotiation through the `Accept` header.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Representation requested from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    Any,
}

impl ResponseFormat {
    /// Value sent in the `Accept` header.
    pub fn accept_header_value(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "application/xml",
            ResponseFormat::Any => "*/*",
        }
    }

    /// Short token accepted by `FromStr`.
    pub fn token(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
            ResponseFormat::Any => "*",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = ApiError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "json" => Ok(ResponseFormat::Json),
            "xml" => Ok(ResponseFormat::Xml),
            "*" => Ok(ResponseFormat::Any),
            other => Err(ApiError::UnsupportedResponseFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
