use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

#[derive(Debug, Clone)]
pub struct UnverifiedJwt {
    token: String,
}

impl UnverifiedJwt {
    pub fn new(raw_token: impl Into<String>) -> Self {
        UnverifiedJwt {
            token: raw_token.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn header(&self) -> Option<serde_json::Value> {
        self.segment(0)
    }

    pub fn claims(&self) -> Option<serde_json::Value> {
        self.segment(1)
    }

    fn segment(&self, index: usize) -> Option<serde_json::Value> {
        let segment = self.token.split('.').nth(index)?;
        let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_from(header: &str, claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn reads_raw_segments() {
        let token = token_from(r#"{"alg":"HS256","typ":"JWT"}"#, r#"{"aud":"tenant-y"}"#);
        let jwt = UnverifiedJwt::new(token);

        assert_eq!(
            jwt.header().and_then(|h| h.get("alg").cloned()),
            Some(serde_json::json!("HS256"))
        );
        assert_eq!(
            jwt.claims().and_then(|c| c.get("aud").cloned()),
            Some(serde_json::json!("tenant-y"))
        );
    }

    #[test]
    fn tolerates_garbage() {
        let jwt = UnverifiedJwt::new("not-a-jwt");

        assert!(jwt.header().is_none());
        assert!(jwt.claims().is_none());
    }
}
