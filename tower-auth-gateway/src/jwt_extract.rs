use http::HeaderMap;

use crate::{error::AuthError, jwt_unverified::UnverifiedJwt};

pub trait JwtExtractor {
    fn extract_jwt(&self, headers: &HeaderMap) -> Result<UnverifiedJwt, AuthError>;
}

/// Extracts the credential from the `Authorization` header.
///
/// The header value must be exactly `Bearer <token>` or `bearer <token>`:
/// one space, then a non-empty token containing no further whitespace.
/// Any other casing of the scheme word is rejected.
pub struct BearerTokenJwtExtractor;

impl JwtExtractor for BearerTokenJwtExtractor {
    fn extract_jwt(&self, headers: &HeaderMap) -> Result<UnverifiedJwt, AuthError> {
        let value = headers
            .get(http::header::AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorizationHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthorizationHeader)?;
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
            .ok_or(AuthError::InvalidAuthorizationHeader)?;
        if token.is_empty() || token.contains(char::is_whitespace) {
            return Err(AuthError::InvalidAuthorizationHeader);
        }
        Ok(UnverifiedJwt::new(token))
    }
}
