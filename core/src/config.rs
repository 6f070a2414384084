//! Client configuration.
//!
//! # Design
//! Client id and secret are validated once at construction and cannot change
//! afterwards. The access token, development flag, redirect URI and response
//! format are changed only through setters; `set_response_format` leaves the
//! previous format in place when the token is rejected.

use crate::error::ApiError;
use crate::format::ResponseFormat;

pub const ENV_CLIENT_ID: &str = "SOUNDCLOUD_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SOUNDCLOUD_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SOUNDCLOUD_REDIRECT_URI";
pub const ENV_DEVELOPMENT: &str = "SOUNDCLOUD_DEVELOPMENT";
pub const ENV_ACCESS_TOKEN: &str = "SOUNDCLOUD_ACCESS_TOKEN";
pub const ENV_RESPONSE_FORMAT: &str = "SOUNDCLOUD_RESPONSE_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    development: bool,
    access_token: Option<String>,
    response_format: ResponseFormat,
}

impl ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(ApiError::MissingClientCredentials);
        }
        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: redirect_uri.into(),
            development: false,
            access_token: None,
            response_format: ResponseFormat::default(),
        })
    }

    /// Load from the `SOUNDCLOUD_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(
            lookup(ENV_CLIENT_ID).unwrap_or_default(),
            lookup(ENV_CLIENT_SECRET).unwrap_or_default(),
            lookup(ENV_REDIRECT_URI).unwrap_or_default(),
        )?;
        if let Some(value) = lookup(ENV_DEVELOPMENT) {
            config.set_development(parse_bool(ENV_DEVELOPMENT, &value)?);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.is_empty()) {
            config.set_access_token(token);
        }
        if let Some(format) = lookup(ENV_RESPONSE_FORMAT) {
            config.set_response_format(&format)?;
        }
        Ok(config)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) {
        self.redirect_uri = redirect_uri.into();
    }

    pub fn development(&self) -> bool {
        self.development
    }

    pub fn set_development(&mut self, development: bool) {
        self.development = development;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    /// Set the format from a `json`, `xml` or `*` token.
    pub fn set_response_format(&mut self, token: &str) -> Result<(), ApiError> {
        self.response_format = token.parse()?;
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ApiError::Configuration(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
