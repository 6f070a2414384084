//! Request builder and response classifier for the SoundCloud API.
//!
//! # Design
//! `SoundCloudClient` owns a `ClientConfig` and nothing else. Each call
//! builds an `HttpRequest` (`build_*`) or classifies an `HttpResponse`
//! (`parse_*`); the caller executes the round-trip, directly or through a
//! `Transport` handed to `execute`. Nothing is retried or cached.
//!
//! Every request carries `Accept` first and, when an access token is set,
//! `Authorization: OAuth <token>` second. Token-endpoint requests are the
//! exception: they always ask for JSON and never send an `Authorization`
//! header.
//!
//! Setters take `&mut self`; share a client across threads behind your own
//! lock if it is reconfigured concurrently.

use std::path::Path;

use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::endpoint::{encode_query, UrlBuilder, API_VERSION};
use crate::error::ApiError;
use crate::format::ResponseFormat;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, Transport};
use crate::mime::{audio_mime_type, audio_mime_type_for_path};
use crate::oauth::{AccessToken, Grant, OAuthFlow};
use crate::response::{classify_response, ApiResponse};
use crate::USER_AGENT;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Multipart field carrying the audio file of an uploaded track.
pub const TRACK_ASSET_FIELD: &str = "track[asset_data]";

#[derive(Debug, Clone)]
pub struct SoundCloudClient {
    config: ClientConfig,
}

impl SoundCloudClient {
    /// Fails with `MissingClientCredentials` if `client_id` or `client_secret` is empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_config(ClientConfig::new(
            client_id,
            client_secret,
            redirect_uri,
        )?))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client_id(&self) -> &str {
        self.config.client_id()
    }

    pub fn client_secret(&self) -> &str {
        self.config.client_secret()
    }

    pub fn redirect_uri(&self) -> &str {
        self.config.redirect_uri()
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: impl Into<String>) {
        self.config.set_redirect_uri(redirect_uri);
    }

    pub fn access_token(&self) -> Option<&str> {
        self.config.access_token()
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.config.set_access_token(token);
    }

    pub fn clear_access_token(&mut self) {
        self.config.clear_access_token();
    }

    pub fn development(&self) -> bool {
        self.config.development()
    }

    pub fn set_development(&mut self, development: bool) {
        self.config.set_development(development);
    }

    /// Negotiated `Accept` header value.
    pub fn response_format(&self) -> &'static str {
        self.config.response_format().accept_header_value()
    }

    pub fn set_response_format(&mut self, token: &str) -> Result<(), ApiError> {
        self.config.set_response_format(token)
    }

    pub fn api_version(&self) -> u32 {
        API_VERSION
    }

    pub fn user_agent(&self) -> &'static str {
        USER_AGENT
    }

    pub fn audio_mime_type(&self, extension: &str) -> Result<&'static str, ApiError> {
        audio_mime_type(extension)
    }

    fn url_builder(&self) -> UrlBuilder {
        UrlBuilder::new(self.config.development())
    }

    fn oauth(&self) -> OAuthFlow<'_> {
        OAuthFlow {
            client_id: self.config.client_id(),
            client_secret: self.config.client_secret(),
            redirect_uri: self.config.redirect_uri(),
            development: self.config.development(),
        }
    }

    pub fn build_url(
        &self,
        resource: &str,
        params: &[(&str, &str)],
        use_api_version: bool,
    ) -> Result<String, ApiError> {
        self.url_builder().build(resource, params, use_api_version)
    }

    pub fn authorize_url(&self, extra: &[(&str, &str)]) -> String {
        self.oauth().authorize_url(extra)
    }

    pub fn access_token_url(&self) -> &'static str {
        self.oauth().access_token_url()
    }

    /// `Accept`, then `Authorization` if an access token is set.
    pub fn build_default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Accept".to_string(),
            self.response_format().to_string(),
        )];
        if let Some(token) = self.config.access_token() {
            headers.push(("Authorization".to_string(), format!("OAuth {token}")));
        }
        headers
    }

    fn request(
        &self,
        method: HttpMethod,
        url: String,
        headers: Vec<(String, String)>,
        body: Option<RequestBody>,
    ) -> HttpRequest {
        debug!(%method, %url, "built request");
        HttpRequest {
            method,
            url,
            headers,
            body,
            user_agent: USER_AGENT.to_string(),
        }
    }

    fn build_form(
        &self,
        method: HttpMethod,
        resource: &str,
        fields: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let url = self.build_url(resource, &[], true)?;
        let mut headers = self.build_default_headers();
        headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
        Ok(self.request(
            method,
            url,
            headers,
            Some(RequestBody::Form(encode_query(fields))),
        ))
    }

    /// GET `resource` with `params` in the query string.
    pub fn build_get(&self, resource: &str, params: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        let url = self.build_url(resource, params, true)?;
        Ok(self.request(HttpMethod::Get, url, self.build_default_headers(), None))
    }

    /// DELETE `resource` with `params` in the query string.
    pub fn build_delete(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let url = self.build_url(resource, params, true)?;
        Ok(self.request(HttpMethod::Delete, url, self.build_default_headers(), None))
    }

    /// POST `fields` to `resource` as a form body.
    pub fn build_post(&self, resource: &str, fields: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        self.build_form(HttpMethod::Post, resource, fields)
    }

    /// PUT `fields` to `resource` as a form body.
    pub fn build_put(&self, resource: &str, fields: &[(&str, &str)]) -> Result<HttpRequest, ApiError> {
        self.build_form(HttpMethod::Put, resource, fields)
    }

    /// Multipart POST to `tracks` with the audio file at `path`.
    ///
    /// Fails with `UnsupportedAudioFormat` before anything is built if the
    /// file extension is not a supported audio format.
    pub fn build_upload_track(
        &self,
        path: &Path,
        fields: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError> {
        let content_type = audio_mime_type_for_path(path)?;
        let url = self.build_url("tracks", &[], true)?;
        let mut parts: Vec<MultipartPart> = fields
            .iter()
            .map(|(name, value)| MultipartPart::Text {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect();
        parts.push(MultipartPart::File {
            name: TRACK_ASSET_FIELD.to_string(),
            path: path.to_path_buf(),
            content_type: content_type.to_string(),
        });
        Ok(self.request(
            HttpMethod::Post,
            url,
            self.build_default_headers(),
            Some(RequestBody::Multipart(parts)),
        ))
    }

    fn build_token_request(&self, grant: Grant<'_>, extra: &[(&str, &str)]) -> HttpRequest {
        let headers = vec![
            (
                "Accept".to_string(),
                ResponseFormat::Json.accept_header_value().to_string(),
            ),
            ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
        ];
        let body = self.oauth().token_request_body(grant, extra);
        self.request(
            HttpMethod::Post,
            self.access_token_url().to_string(),
            headers,
            Some(RequestBody::Form(body)),
        )
    }

    /// Exchange an authorization `code` for an access token.
    pub fn build_access_token_request(&self, code: &str, extra: &[(&str, &str)]) -> HttpRequest {
        self.build_token_request(Grant::AuthorizationCode { code }, extra)
    }

    /// Exchange user credentials for an access token.
    pub fn build_credentials_flow_request(&self, username: &str, password: &str) -> HttpRequest {
        self.build_token_request(Grant::Password { username, password }, &[])
    }

    pub fn build_refresh_token_request(&self, refresh_token: &str) -> HttpRequest {
        self.build_token_request(Grant::RefreshToken { refresh_token }, &[])
    }

    pub fn build_client_credentials_request(&self) -> HttpRequest {
        self.build_token_request(Grant::ClientCredentials, &[])
    }

    /// Parse the raw headers of `response` and classify it by status code.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        trace!(status = response.status, "classifying response");
        classify_response(response).into_result()
    }

    /// Decode a token-endpoint response and store its access token.
    pub fn parse_access_token(&mut self, response: HttpResponse) -> Result<AccessToken, ApiError> {
        let token: AccessToken = self.parse_response(response)?.json()?;
        self.config.set_access_token(token.access_token.clone());
        Ok(token)
    }

    /// Send `request` through `transport` and classify the response.
    pub fn execute<T: Transport>(
        &self,
        transport: &T,
        request: &HttpRequest,
    ) -> Result<ApiResponse, ApiError> {
        let response = transport
            .send(request)
            .map_err(|e| ApiError::TransportFailure(e.into()))?;
        self.parse_response(response)
    }
}
