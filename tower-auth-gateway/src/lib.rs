#![doc = include_str!("../README.md")]

/// Builder used to construct an [AuthGateway](crate::gateway::AuthGateway) instance.
///
/// For further information on the different properties,
/// see [AuthGatewayBuilder](crate::builder::AuthGatewayBuilder).
///
/// # Example using [DefaultClaims](crate::claims::DefaultClaims)
///
/// ```
/// use tower_auth_gateway::gateway::AuthGateway;
///
/// let gateway = <AuthGateway>::builder()
///     .jwt_secret("some-shared-secret")
///     .default_audience("default-aud")
///     .build()
///     .expect("Failed to build gateway");
/// ```
///
/// # Example using custom claims implementation
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use tower_auth_gateway::gateway::AuthGateway;
///
/// #[derive(Clone, Debug, Deserialize, Serialize)]
/// struct MyClaims {
///     pub sub: String,
///     pub role: String,
/// }
///
/// let gateway = AuthGateway::<MyClaims>::builder()
///     .jwt_secret("some-shared-secret")
///     .default_audience("default-aud")
///     .build()
///     .expect("Failed to build gateway");
/// ```
pub mod builder;

/// Default claims implementation.
///
/// Used by default when constructing an [AuthGateway](crate::gateway::AuthGateway).
///
/// If you need other claims, an own struct can be provided
/// to [AuthGateway](crate::gateway::AuthGateway) as a
/// generic parameter.
pub mod claims;

/// The actual tower middleware
///
/// Contains implementations of [Service](https://docs.rs/tower/latest/tower/trait.Service.html)
/// and [Layer](https://docs.rs/tower/latest/tower/trait.Layer.html)
/// from the tower library.
///
/// You shouldn't need to interact with these implementations, more than
/// calling [AuthGateway::into_layer()](crate::gateway::AuthGateway::into_layer).
pub mod layer;

/// [AuthGateway](crate::gateway::AuthGateway) is what underpins the tower
/// middleware, and actually performs bearer extraction, JWT validation
/// against the pinned algorithm and audience resolution.
///
/// It's recommended to keep a single instance of this in
/// an [Arc](https://doc.rust-lang.org/std/sync/struct.Arc.html)
/// and provide references to it to the different routes
/// where authentication is needed.
pub mod gateway;

/// [ClaimsValidationSpec](crate::validation::ClaimsValidationSpec) is used to
/// optionally customize what claims that are required in incoming JWTs.
///
/// Provided when constructing an [AuthGateway](crate::gateway::AuthGateway)
/// via [claims_validation](crate::builder::AuthGatewayBuilder::claims_validation).
pub mod validation;

/// [AudienceResolver](crate::audience::AudienceResolver) selects the tenant
/// a request is scoped to: override header first, then the verified `aud`
/// claim, then the configured default.
///
/// The resolved value is installed as a
/// [ResolvedAudience](crate::audience::ResolvedAudience) request extension.
pub mod audience;

/// [UnverifiedJwt](crate::jwt_unverified::UnverifiedJwt) is used internally
/// to represent an unverified JWT.
pub mod jwt_unverified;

/// [JwtExtractor](crate::jwt_extract::JwtExtractor) pulls the bearer
/// credential out of the request headers.
///
/// Provide your own implementation via
/// [jwt_extractor](crate::builder::AuthGatewayBuilder::jwt_extractor) if
/// credentials arrive in a non-standard header.
pub mod jwt_extract;

/// [JwtValidator](crate::jwt_validate::JwtValidator) verifies tokens
/// against the pinned signing algorithm and shared secret.
pub mod jwt_validate;

/// Error types: [AuthError](crate::error::AuthError) for request-scoped
/// authentication failures, [StartupError](crate::error::StartupError) for
/// construction-time configuration problems and
/// [ProviderError](crate::error::ProviderError) for provider lookup and
/// adapter failures.
pub mod error;

/// [ErrorHandler](crate::error_handler::ErrorHandler) maps authentication
/// failures to terminal responses. The default responds with an empty 401.
pub mod error_handler;

/// [ProviderRegistry](crate::provider::ProviderRegistry) constructs and
/// hands out credential-bound external provider instances: OAuth identity
/// providers for social sign-in and SMS providers for one-time-passcode
/// delivery.
pub mod provider;
