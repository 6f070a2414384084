//! Absolute URL assembly for API resources.
//!
//! # Design
//! Relative resources are expanded to
//! `https://api.{domain}[/v{API_VERSION}]/{resource}[?query]`, where the
//! domain switches to the sandbox in development mode. Resources that are
//! already absolute URLs pass through untouched apart from the query string,
//! so callers can follow fully-qualified links returned by the API.
//!
//! Relative resources are treated as a path only: each `/`-separated segment
//! is percent-encoded, so `?` and `#` inside a resource never start a query
//! or fragment. Parameters always land in the query, ahead of any fragment.
//!
//! Query strings use `application/x-www-form-urlencoded` encoding (spaces as
//! `+`) and keep the caller's parameter order.

use url::{form_urlencoded, ParseError, Url};

use crate::error::ApiError;

/// API version segment inserted into resource URLs.
pub const API_VERSION: u32 = 1;

pub const PRODUCTION_DOMAIN: &str = "soundcloud.com";
pub const DEVELOPMENT_DOMAIN: &str = "sandbox-soundcloud.com";

/// Base domain for the selected environment.
pub fn domain(development: bool) -> &'static str {
    if development {
        DEVELOPMENT_DOMAIN
    } else {
        PRODUCTION_DOMAIN
    }
}

/// Encode parameters as a query string, preserving their order. Empty input gives `""`.
pub fn encode_query(params: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Whether `resource` is already an absolute URL with a scheme and host.
pub fn is_absolute(resource: &str) -> bool {
    Url::parse(resource).map(|url| url.has_host()).unwrap_or(false)
}

fn append_query(url: &mut Url, params: &[(&str, &str)]) {
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
}

/// Builds absolute API URLs for one environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlBuilder {
    development: bool,
}

impl UrlBuilder {
    pub fn new(development: bool) -> Self {
        Self { development }
    }

    pub fn api_host(&self) -> String {
        format!("api.{}", domain(self.development))
    }

    /// Build the URL for `resource` with `params` appended as the query string.
    ///
    /// `use_api_version` controls the `/v1` segment and is ignored for
    /// absolute resources.
    pub fn build(
        &self,
        resource: &str,
        params: &[(&str, &str)],
        use_api_version: bool,
    ) -> Result<String, ApiError> {
        if is_absolute(resource) {
            if params.is_empty() {
                return Ok(resource.to_string());
            }
            let mut url = Url::parse(resource)?;
            append_query(&mut url, params);
            return Ok(url.into());
        }

        let mut url = Url::parse(&format!("https://{}", self.api_host()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.clear();
            if use_api_version {
                segments.push(&format!("v{API_VERSION}"));
            }
            segments.extend(resource.trim_start_matches('/').split('/'));
        }
        append_query(&mut url, params);
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> UrlBuilder {
        UrlBuilder::new(false)
    }

    #[test]
    fn builds_versioned_resource_url() {
        assert_eq!(
            production().build("me", &[], true).unwrap(),
            "https://api.soundcloud.com/v1/me"
        );
    }

    #[test]
    fn development_uses_sandbox_host() {
        assert_eq!(
            UrlBuilder::new(true).build("me", &[], true).unwrap(),
            "https://api.sandbox-soundcloud.com/v1/me"
        );
    }

    #[test]
    fn version_segment_is_optional() {
        assert_eq!(
            production().build("me", &[], false).unwrap(),
            "https://api.soundcloud.com/me"
        );
    }

    #[test]
    fn leading_slash_is_normalized() {
        assert_eq!(
            production().build("/me", &[], true).unwrap(),
            "https://api.soundcloud.com/v1/me"
        );
        assert_eq!(
            production().build("//me", &[], false).unwrap(),
            "https://api.soundcloud.com/me"
        );
    }

    #[test]
    fn absolute_url_passes_through() {
        assert_eq!(
            production().build("https://api.soundcloud.com/me", &[], true).unwrap(),
            "https://api.soundcloud.com/me"
        );
        assert_eq!(
            UrlBuilder::new(true)
                .build("https://api.soundcloud.com/me", &[], true)
                .unwrap(),
            "https://api.soundcloud.com/me"
        );
    }

    #[test]
    fn query_is_form_encoded_in_order() {
        assert_eq!(
            production()
                .build("tracks", &[("q", "rofl dubstep")], true)
                .unwrap(),
            "https://api.soundcloud.com/v1/tracks?q=rofl+dubstep"
        );
        assert_eq!(
            production()
                .build("tracks", &[("q", "rofl dubstep"), ("filter", "public")], true)
                .unwrap(),
            "https://api.soundcloud.com/v1/tracks?q=rofl+dubstep&filter=public"
        );
    }

    #[test]
    fn absolute_url_gets_query_appended() {
        assert_eq!(
            production()
                .build("https://api.soundcloud.com/me", &[("limit", "5")], true)
                .unwrap(),
            "https://api.soundcloud.com/me?limit=5"
        );
        assert_eq!(
            production()
                .build("https://api.soundcloud.com/tracks?q=a", &[("limit", "5")], true)
                .unwrap(),
            "https://api.soundcloud.com/tracks?q=a&limit=5"
        );
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(
            encode_query(&[("redirect_uri", "http://soundcloud.local/callback")]),
            "redirect_uri=http%3A%2F%2Fsoundcloud.local%2Fcallback"
        );
        assert_eq!(encode_query(&[("a&b", "c=d")]), "a%26b=c%3Dd");
        assert_eq!(encode_query(&[]), "");
    }

    #[test]
    fn absolute_detection() {
        assert!(is_absolute("https://api.soundcloud.com/me"));
        assert!(is_absolute("http://localhost:3000/v1/me"));
        assert!(!is_absolute("me"));
        assert!(!is_absolute("/tracks/1"));
        assert!(!is_absolute("mailto:someone@example.com"));
    }

    #[test]
    fn relative_path_segments_are_escaped() {
        assert_eq!(
            production().build("tracks/a b", &[], true).unwrap(),
            "https://api.soundcloud.com/v1/tracks/a%20b"
        );
        assert_eq!(
            production().build("users/x?y#z", &[("limit", "5")], false).unwrap(),
            "https://api.soundcloud.com/users/x%3Fy%23z?limit=5"
        );
    }

    #[test]
    fn query_goes_before_fragment() {
        let url = production()
            .build("https://api.soundcloud.com/me#top", &[("limit", "5")], true)
            .unwrap();
        assert_eq!(url, "https://api.soundcloud.com/me?limit=5#top");

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.query(), Some("limit=5"));
        assert_eq!(parsed.fragment(), Some("top"));
    }

    #[test]
    fn absolute_url_without_params_is_untouched() {
        let resource = "https://api.soundcloud.com/me#top";
        assert_eq!(production().build(resource, &[], true).unwrap(), resource);
    }

    #[test]
    fn domain_selection() {
        assert_eq!(domain(false), "soundcloud.com");
        assert_eq!(domain(true), "sandbox-soundcloud.com");
        assert_eq!(UrlBuilder::new(true).api_host(), "api.sandbox-soundcloud.com");
    }
}
