use core::fmt;
use std::sync::Arc;

use http::{HeaderMap, Request};
use log::debug;
use serde::de::DeserializeOwned;

use crate::{
    audience::{AudienceResolver, ResolvedAudience},
    claims::DefaultClaims,
    error::AuthError,
    error_handler::{DefaultErrorHandler, ErrorHandler},
    jwt_extract::JwtExtractor,
    jwt_validate::JwtValidator,
    layer::AuthGatewayLayer,
};

/// AuthGateway
///
/// This is the actual middleware core. It verifies the bearer credential
/// of an incoming request, resolves the request audience and installs
/// both as request extensions for downstream handlers.
/// May be turned into a tower layer by calling [into_layer](AuthGateway::into_layer).
#[derive(Clone)]
pub struct AuthGateway<Claims = DefaultClaims> {
    jwt_extractor: Arc<dyn JwtExtractor + Send + Sync>,
    jwt_validator: Arc<dyn JwtValidator<Claims> + Send + Sync>,
    audience_resolver: AudienceResolver,
}

impl<Claims> AuthGateway<Claims>
where
    Claims: Clone + DeserializeOwned + Send + Sync + 'static,
{
    pub(crate) fn new(
        jwt_extractor: Arc<dyn JwtExtractor + Send + Sync>,
        jwt_validator: Arc<dyn JwtValidator<Claims> + Send + Sync>,
        audience_resolver: AudienceResolver,
    ) -> AuthGateway<Claims> {
        AuthGateway {
            jwt_extractor,
            jwt_validator,
            audience_resolver,
        }
    }

    pub(crate) fn authorize_request<Body>(
        &self,
        mut request: Request<Body>,
    ) -> Result<Request<Body>, AuthError> {
        let token = match self.jwt_extractor.extract_jwt(request.headers()) {
            Ok(token) => token,
            Err(e) => {
                debug!("JWT extraction failed: {}", e);
                return Err(e);
            }
        };
        let claims = match self.jwt_validator.validate(&token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("JWT validation failed: {}", e);
                return Err(e);
            }
        };
        let audience = self
            .audience_resolver
            .resolve(request.headers(), token.claims().as_ref());
        debug!("JWT validation successful (audience {})", audience);
        request.extensions_mut().insert(claims);
        request.extensions_mut().insert(audience);
        Ok(request)
    }

    /// Resolve the audience for a request that did not pass through the
    /// authentication layer. Public endpoints still belong to a tenant;
    /// without claims the resolver checks the override header and then
    /// falls back to the configured default.
    pub fn resolve_audience(&self, headers: &HeaderMap) -> ResolvedAudience {
        self.audience_resolver.resolve(headers, None)
    }
}

impl<Claims> fmt::Debug for AuthGateway<Claims> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGateway").finish()
    }
}

impl<Claims> AuthGateway<Claims>
where
    Claims: Clone,
{
    /// Returns a [tower layer](https://docs.rs/tower/latest/tower/trait.Layer.html).
    pub fn into_layer<ResBody>(&self) -> AuthGatewayLayer<ResBody, Claims>
    where
        ResBody: Default,
    {
        AuthGatewayLayer::new(self.clone(), Arc::new(DefaultErrorHandler))
    }

    /// Returns a [tower layer](https://docs.rs/tower/latest/tower/trait.Layer.html) that uses a custom [ErrorHandler] implementation.
    pub fn into_layer_with_error_handler<ResBody>(
        &self,
        error_handler: Arc<dyn ErrorHandler<ResBody>>,
    ) -> AuthGatewayLayer<ResBody, Claims> {
        AuthGatewayLayer::new(self.clone(), error_handler)
    }
}
