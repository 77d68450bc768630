use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;

use crate::{error::AuthError, jwt_unverified::UnverifiedJwt, validation::ClaimsValidationSpec};

pub trait JwtValidator<Claims> {
    fn validate(&self, jwt: &UnverifiedJwt) -> Result<Claims, AuthError>;
}

/// Validates JWTs against a single symmetric secret and a pinned signing
/// algorithm.
///
/// The algorithm a token declares must equal the pinned one; anything
/// else is rejected before signature verification with
/// [AuthError::MismatchingAlgorithm]. Tokens whose declared algorithm
/// cannot be parsed at all, `"none"` included, fail earlier with
/// [AuthError::ParseJwtError]. Validation is a pure function of token,
/// secret and clock; it holds no mutable state.
pub struct PinnedJwtValidator {
    algorithm: Algorithm,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl PinnedJwtValidator {
    pub(crate) fn new(
        algorithm: Algorithm,
        secret: &[u8],
        claims_validation: &ClaimsValidationSpec,
    ) -> Self {
        Self {
            algorithm,
            decoding_key: DecodingKey::from_secret(secret),
            validation: create_validation(algorithm, claims_validation),
        }
    }
}

impl<Claims> JwtValidator<Claims> for PinnedJwtValidator
where
    Claims: DeserializeOwned,
{
    fn validate(&self, token: &UnverifiedJwt) -> Result<Claims, AuthError> {
        let header = decode_header(token.as_str()).or(Err(AuthError::ParseJwtError))?;
        if header.alg != self.algorithm {
            return Err(AuthError::MismatchingAlgorithm {
                expected: self.algorithm,
                actual: header.alg,
            });
        }

        match decode::<Claims>(token.as_str(), &self.decoding_key, &self.validation) {
            Ok(result) => Ok(result.claims),
            Err(e) => Err(AuthError::ValidationFailed {
                reason: e.into_kind(),
            }),
        }
    }
}

fn create_validation(algorithm: Algorithm, spec: &ClaimsValidationSpec) -> Validation {
    let mut validation = Validation::new(algorithm);
    let mut required_claims = Vec::<&'static str>::new();
    if let Some(iss) = &spec.iss {
        required_claims.push("iss");
        validation.set_issuer(&[iss]);
    }
    if spec.exp {
        required_claims.push("exp");
    }
    validation.validate_exp = spec.exp;
    if spec.nbf {
        required_claims.push("nbf");
    }
    validation.validate_nbf = spec.nbf;
    if let Some(aud) = &spec.aud {
        required_claims.push("aud");
        validation.set_audience(aud);
    } else {
        validation.validate_aud = false;
    }
    validation.set_required_spec_claims(&required_claims);
    validation
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use jsonwebtoken::{encode, errors::ErrorKind, EncodingKey, Header};
    use lazy_static::lazy_static;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    const SECRET: &str = "test-signing-secret";

    lazy_static! {
        static ref ENCODING_KEY: EncodingKey = EncodingKey::from_secret(SECRET.as_bytes());
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    struct Claims {
        sub: Option<String>,
    }

    fn create_validator(claims_validation: ClaimsValidationSpec) -> PinnedJwtValidator {
        PinnedJwtValidator::new(Algorithm::HS256, SECRET.as_bytes(), &claims_validation)
    }

    fn jwt_from(claims: &Value, algorithm: Algorithm) -> String {
        encode(&Header::new(algorithm), claims, &ENCODING_KEY).unwrap()
    }

    fn unix_epoch_sec_from_now(sec: i64) -> u64 {
        (SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + sec) as u64
    }

    #[test]
    fn empty_token() {
        let validator = create_validator(ClaimsValidationSpec::new());
        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(""));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), AuthError::ParseJwtError);
    }

    #[test]
    fn unsigned_token() {
        // alg "none" is outside the JWT algorithm set jsonwebtoken can
        // represent, so header parsing itself fails.
        let token = format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode("{}")
        );
        let validator = create_validator(ClaimsValidationSpec::new());
        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), AuthError::ParseJwtError);
    }

    #[test]
    fn foreign_algorithm() {
        let token = jwt_from(&json!({}), Algorithm::HS384);
        let validator = create_validator(ClaimsValidationSpec::new());
        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            AuthError::MismatchingAlgorithm {
                expected: Algorithm::HS256,
                actual: Algorithm::HS384,
            }
        );
    }

    #[test]
    fn invalid_signature() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({}),
            &EncodingKey::from_secret("another-secret".as_bytes()),
        )
        .unwrap();
        let validator = create_validator(ClaimsValidationSpec::new());
        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            AuthError::ValidationFailed {
                reason: ErrorKind::InvalidSignature
            }
        );
    }

    #[test]
    fn missing_exp() {
        let validator = create_validator(ClaimsValidationSpec::new().exp(true));
        let token = jwt_from(&json!({}), Algorithm::HS256);

        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            AuthError::ValidationFailed {
                reason: ErrorKind::MissingRequiredClaim("exp".to_owned())
            }
        );
    }

    #[test]
    fn invalid_exp() {
        let validator = create_validator(ClaimsValidationSpec::new().exp(true));
        let token = jwt_from(
            &json!({ "exp": unix_epoch_sec_from_now(-(60 * 2)) }),
            Algorithm::HS256,
        );

        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            AuthError::ValidationFailed {
                reason: ErrorKind::ExpiredSignature
            }
        );
    }

    #[test]
    fn invalid_iss() {
        let validator =
            create_validator(ClaimsValidationSpec::new().iss("https://some-auth-server.com"));
        let token = jwt_from(
            &json!({ "iss": "https://another-auth-server.com" }),
            Algorithm::HS256,
        );

        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err(),
            AuthError::ValidationFailed {
                reason: ErrorKind::InvalidIssuer
            }
        );
    }

    #[test]
    fn ok() {
        let validator = create_validator(ClaimsValidationSpec::new().exp(true));
        let token = jwt_from(
            &json!({ "sub": "some-user", "exp": unix_epoch_sec_from_now(60) }),
            Algorithm::HS256,
        );

        let result: Result<Claims, _> = validator.validate(&UnverifiedJwt::new(token));

        assert_eq!(
            result.unwrap(),
            Claims {
                sub: Some("some-user".to_owned())
            }
        );
    }

    #[test]
    fn repeated_validation_is_deterministic() {
        let validator = create_validator(ClaimsValidationSpec::new().exp(true));
        let token = UnverifiedJwt::new(jwt_from(
            &json!({ "sub": "some-user", "exp": unix_epoch_sec_from_now(60) }),
            Algorithm::HS256,
        ));

        let first: Claims = validator.validate(&token).unwrap();
        let second: Claims = validator.validate(&token).unwrap();

        assert_eq!(first, second);
    }
}
