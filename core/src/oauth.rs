//! OAuth2 authorization and token-exchange URLs and payloads.
//!
//! # Design
//! The authorization URL follows the configured environment like every other
//! URL, but the token endpoint is pinned to the production API host even in
//! development mode. The token authority is single-homed.
//!
//! Authorization parameters are `client_id`, `redirect_uri` and
//! `response_type=code`, in that order. Caller-supplied parameters follow in
//! their own order; one that reuses a mandatory name replaces that value in
//! place instead of being sent twice.

use serde::{Deserialize, Serialize};

use crate::endpoint::{domain, encode_query};

/// Token endpoint, independent of development mode.
pub const ACCESS_TOKEN_URL: &str = "https://api.soundcloud.com/oauth2/token";

/// An OAuth2 grant exchanged at the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant<'a> {
    AuthorizationCode { code: &'a str },
    Password { username: &'a str, password: &'a str },
    RefreshToken { refresh_token: &'a str },
    ClientCredentials,
}

impl Grant<'_> {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::AuthorizationCode { .. } => "authorization_code",
            Grant::Password { .. } => "password",
            Grant::RefreshToken { .. } => "refresh_token",
            Grant::ClientCredentials => "client_credentials",
        }
    }

    fn sends_redirect_uri(&self) -> bool {
        matches!(
            self,
            Grant::AuthorizationCode { .. } | Grant::RefreshToken { .. }
        )
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Builds OAuth2 URLs and token-request bodies from client credentials.
#[derive(Debug, Clone, Copy)]
pub struct OAuthFlow<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub development: bool,
}

impl<'a> OAuthFlow<'a> {
    /// URL the user is redirected to in order to authorize the application.
    pub fn authorize_url(&self, extra: &[(&'a str, &'a str)]) -> String {
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.client_id),
            ("redirect_uri", self.redirect_uri),
            ("response_type", "code"),
        ];
        merge_params(&mut params, extra);
        format!(
            "https://{}/connect?{}",
            domain(self.development),
            encode_query(&params)
        )
    }

    pub fn access_token_url(&self) -> &'static str {
        ACCESS_TOKEN_URL
    }

    /// Form-encoded body for exchanging `grant` at the token endpoint.
    pub fn token_request_body(&self, grant: Grant<'a>, extra: &[(&'a str, &'a str)]) -> String {
        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.client_id),
            ("client_secret", self.client_secret),
        ];
        if grant.sends_redirect_uri() {
            params.push(("redirect_uri", self.redirect_uri));
        }
        params.push(("grant_type", grant.grant_type()));
        match grant {
            Grant::AuthorizationCode { code } => params.push(("code", code)),
            Grant::Password { username, password } => {
                params.push(("username", username));
                params.push(("password", password));
            }
            Grant::RefreshToken { refresh_token } => params.push(("refresh_token", refresh_token)),
            Grant::ClientCredentials => {}
        }
        merge_params(&mut params, extra);
        encode_query(&params)
    }
}

/// Overwrite existing keys in place, append new ones in order.
fn merge_params<'a>(params: &mut Vec<(&'a str, &'a str)>, extra: &[(&'a str, &'a str)]) {
    for &(key, value) in extra {
        match params.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => params.push((key, value)),
        }
    }
}
