use std::fmt::Display;

use http::{header::HeaderName, HeaderMap};

/// Default name of the audience override header.
pub const DEFAULT_AUD_HEADER: &str = "x-jwt-aud";

/// The tenant a request was resolved to.
///
/// Installed as a request extension by the middleware after successful
/// authentication. For routes that bypass the authentication layer,
/// obtain one via [AuthGateway::resolve_audience](crate::gateway::AuthGateway::resolve_audience).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAudience(pub String);

impl ResolvedAudience {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResolvedAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Selects the audience for a request.
///
/// Sources are checked in a strict order and the first non-empty value
/// wins:
/// 1. the audience override header,
/// 2. the `aud` claim of the verified token, when it is a string,
/// 3. the configured default audience.
///
/// The resolver also runs for requests that carried no bearer token, in
/// which case it is handed no claims and falls through to the default.
#[derive(Clone, Debug)]
pub struct AudienceResolver {
    header_name: HeaderName,
    default_audience: String,
}

impl AudienceResolver {
    pub(crate) fn new(header_name: HeaderName, default_audience: String) -> Self {
        Self {
            header_name,
            default_audience,
        }
    }

    pub fn resolve(
        &self,
        headers: &HeaderMap,
        claims: Option<&serde_json::Value>,
    ) -> ResolvedAudience {
        if let Some(aud) = headers.get(&self.header_name).and_then(|v| v.to_str().ok()) {
            if !aud.is_empty() {
                return ResolvedAudience(aud.to_owned());
            }
        }
        if let Some(aud) = claims.and_then(|c| c.get("aud")).and_then(|v| v.as_str()) {
            if !aud.is_empty() {
                return ResolvedAudience(aud.to_owned());
            }
        }
        ResolvedAudience(self.default_audience.clone())
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use serde_json::json;

    use super::*;

    fn resolver() -> AudienceResolver {
        AudienceResolver::new(
            HeaderName::from_static(DEFAULT_AUD_HEADER),
            "default-aud".to_owned(),
        )
    }

    fn headers_with_aud(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(DEFAULT_AUD_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn header_wins_over_claim() {
        let claims = json!({ "aud": "tenant-y" });
        let result = resolver().resolve(&headers_with_aud("tenant-x"), Some(&claims));

        assert_eq!(result, ResolvedAudience("tenant-x".to_owned()));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-JWT-AUD", HeaderValue::from_static("tenant-x"));
        let result = resolver().resolve(&headers, None);

        assert_eq!(result, ResolvedAudience("tenant-x".to_owned()));
    }

    #[test]
    fn claim_wins_over_default() {
        let claims = json!({ "aud": "tenant-y" });
        let result = resolver().resolve(&HeaderMap::new(), Some(&claims));

        assert_eq!(result, ResolvedAudience("tenant-y".to_owned()));
    }

    #[test]
    fn falls_back_to_default() {
        let result = resolver().resolve(&HeaderMap::new(), None);

        assert_eq!(result, ResolvedAudience("default-aud".to_owned()));
    }

    #[test]
    fn empty_header_falls_through() {
        let claims = json!({ "aud": "tenant-y" });
        let result = resolver().resolve(&headers_with_aud(""), Some(&claims));

        assert_eq!(result, ResolvedAudience("tenant-y".to_owned()));
    }

    #[test]
    fn non_string_claim_falls_through() {
        let claims = json!({ "aud": ["tenant-y", "tenant-z"] });
        let result = resolver().resolve(&HeaderMap::new(), Some(&claims));

        assert_eq!(result, ResolvedAudience("default-aud".to_owned()));
    }
}
