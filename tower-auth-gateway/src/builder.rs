use std::{marker::PhantomData, sync::Arc};

use http::header::HeaderName;
use jsonwebtoken::Algorithm;
use log::info;
use serde::de::DeserializeOwned;

use crate::{
    audience::{AudienceResolver, DEFAULT_AUD_HEADER},
    error::StartupError,
    gateway::AuthGateway,
    jwt_extract::{BearerTokenJwtExtractor, JwtExtractor},
    jwt_validate::PinnedJwtValidator,
    validation::ClaimsValidationSpec,
};

pub struct AuthGatewayBuilder<Claims>
where
    Claims: Clone + DeserializeOwned + Send + Sync + 'static,
{
    jwt_secret: Option<String>,
    algorithm: Algorithm,
    default_audience: Option<String>,
    audience_header_name: Option<String>,
    claims_validation_spec: Option<ClaimsValidationSpec>,
    jwt_extractor: Option<Arc<dyn JwtExtractor + Send + Sync>>,
    phantom: PhantomData<Claims>,
}

impl<Claims> AuthGateway<Claims>
where
    Claims: Clone + DeserializeOwned + Send + Sync + 'static,
{
    pub fn builder() -> AuthGatewayBuilder<Claims> {
        AuthGatewayBuilder::new()
    }
}

impl<Claims> AuthGatewayBuilder<Claims>
where
    Claims: Clone + DeserializeOwned + Send + Sync + 'static,
{
    fn new() -> Self {
        AuthGatewayBuilder::<Claims> {
            jwt_secret: None,
            algorithm: Algorithm::HS256,
            default_audience: None,
            audience_header_name: None,
            claims_validation_spec: None,
            jwt_extractor: None,
            phantom: PhantomData,
        }
    }

    /// Set the shared secret that incoming tokens are verified against.
    ///
    /// Required, must be non-empty.
    pub fn jwt_secret(mut self, jwt_secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(jwt_secret.into());
        self
    }

    /// Pin the signing algorithm incoming tokens must declare.
    ///
    /// Only the symmetric HMAC family (HS256, HS384, HS512) is accepted,
    /// since verification uses the shared secret. Tokens declaring any
    /// other algorithm are rejected at request time.
    ///
    /// Default value is `Algorithm::HS256`.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the audience a request falls back to when neither the
    /// override header nor the token provides one.
    ///
    /// Required, must be non-empty.
    pub fn default_audience(mut self, default_audience: impl Into<String>) -> Self {
        self.default_audience = Some(default_audience.into());
        self
    }

    /// Set the name of the audience override header.
    ///
    /// Default value is `x-jwt-aud`. Lookup is case-insensitive.
    pub fn audience_header_name(mut self, audience_header_name: impl Into<String>) -> Self {
        self.audience_header_name = Some(audience_header_name.into());
        self
    }

    /// Set what claims of JWTs to validate.
    ///
    /// By default only `exp` is validated.
    pub fn claims_validation(mut self, claims_validation: ClaimsValidationSpec) -> Self {
        self.claims_validation_spec = Some(claims_validation);
        self
    }

    /// Provide a custom extractor instead of the default
    /// `Authorization: Bearer <token>` one.
    pub fn jwt_extractor(mut self, jwt_extractor: Arc<dyn JwtExtractor + Send + Sync>) -> Self {
        self.jwt_extractor = Some(jwt_extractor);
        self
    }

    /// Construct an AuthGateway.
    ///
    /// All configuration is validated here, so a gateway that constructed
    /// successfully will not surface configuration errors at request time.
    pub fn build(self) -> Result<AuthGateway<Claims>, StartupError> {
        let secret = match self.jwt_secret {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                return Err(StartupError::InvalidParameter(
                    "jwt_secret is required".to_owned(),
                ))
            }
        };
        match self.algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {}
            other => {
                return Err(StartupError::InvalidParameter(format!(
                    "{:?} is not a symmetric HMAC algorithm",
                    other
                )))
            }
        }
        let default_audience = match self.default_audience {
            Some(aud) if !aud.is_empty() => aud,
            _ => {
                return Err(StartupError::InvalidParameter(
                    "default_audience is required".to_owned(),
                ))
            }
        };
        let header_name = self
            .audience_header_name
            .as_deref()
            .unwrap_or(DEFAULT_AUD_HEADER)
            .parse::<HeaderName>()
            .map_err(|_| {
                StartupError::InvalidParameter("Invalid audience header name".to_owned())
            })?;
        let claims_validation_spec = self
            .claims_validation_spec
            .unwrap_or_else(|| ClaimsValidationSpec::new().exp(true));

        info!(
            "Gateway pins {:?} and will validate the following claims: {}",
            self.algorithm, claims_validation_spec
        );

        Ok(AuthGateway::new(
            self.jwt_extractor
                .unwrap_or_else(|| Arc::new(BearerTokenJwtExtractor {})),
            Arc::new(PinnedJwtValidator::new(
                self.algorithm,
                secret.as_bytes(),
                &claims_validation_spec,
            )),
            AudienceResolver::new(header_name, default_audience),
        ))
    }
}

impl<Claims> Default for AuthGatewayBuilder<Claims>
where
    Claims: Clone + DeserializeOwned + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
