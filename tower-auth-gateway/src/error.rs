use std::{error::Error, fmt::Display};

use http::StatusCode;
use jsonwebtoken::Algorithm;

use crate::provider::sms::Channel;

/// Configuration problems detected while constructing the gateway or the
/// provider registry. Nothing in this enum is produced after startup.
#[derive(Clone, Debug, PartialEq)]
pub enum StartupError {
    InvalidParameter(String),
    MisconfiguredProvider { provider: String, reason: String },
}

impl Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl Error for StartupError {}

/// Request-scoped authentication failures.
///
/// Every variant terminates the request with a 401-equivalent response.
/// Display strings are fixed and safe for end users: they never echo
/// header contents or secret material.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    ParseJwtError,
    MismatchingAlgorithm {
        expected: Algorithm,
        actual: Algorithm,
    },
    ValidationFailed {
        reason: jsonwebtoken::errors::ErrorKind,
    },
}

impl Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthorizationHeader | AuthError::InvalidAuthorizationHeader => {
                write!(f, "This endpoint requires a Bearer token")
            }
            AuthError::ParseJwtError => write!(f, "Invalid token: unable to parse JWT"),
            AuthError::MismatchingAlgorithm { expected, actual } => write!(
                f,
                "Invalid token: unexpected signing algorithm {:?} (expected {:?})",
                actual, expected
            ),
            AuthError::ValidationFailed { reason } => {
                write!(f, "Invalid token: {:?}", reason)
            }
        }
    }
}
impl Error for AuthError {}

/// Failures from provider lookup and provider adapters.
///
/// These are returned to the calling handler, which decides the
/// user-facing response. The three adapter variants map to different
/// remedies: `Transport` is worth retrying by the caller,
/// `MalformedResponse` points at a configuration or contract problem, and
/// `Rejected` means the provider itself declined the request.
#[derive(Debug)]
pub enum ProviderError {
    /// No provider is registered under the requested name.
    NotFound(String),
    /// The adapter does not deliver over the requested channel. No
    /// network call was attempted.
    UnsupportedChannel {
        provider: &'static str,
        channel: Channel,
    },
    /// The outbound call never produced a response (connect error,
    /// timeout). Wraps the underlying cause; no retry is performed here.
    Transport {
        provider: &'static str,
        source: reqwest::Error,
    },
    /// The provider responded, but the body did not parse as its
    /// documented shape.
    MalformedResponse {
        provider: &'static str,
        status: StatusCode,
        source: serde_json::Error,
    },
    /// The provider answered with a well-formed body whose status field
    /// was not the success sentinel. `message` carries the provider's
    /// diagnostic text; the error itself stays authoritative.
    Rejected {
        provider: &'static str,
        status: StatusCode,
        kind: String,
        message: String,
    },
}

impl ProviderError {
    /// Diagnostic text reported by the provider alongside a rejection.
    ///
    /// Present text never implies success; gate on the `Result` instead.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            ProviderError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::NotFound(name) => {
                write!(f, "Provider {} could not be found", name)
            }
            ProviderError::UnsupportedChannel { provider, channel } => {
                write!(
                    f,
                    "{}: channel type {:?} is not supported",
                    provider,
                    channel.as_str()
                )
            }
            ProviderError::Transport { provider, source } => {
                write!(f, "{}: failed to execute request: {}", provider, source)
            }
            ProviderError::MalformedResponse {
                provider,
                status,
                source,
            } => write!(
                f,
                "{}: failed to parse response body (status code {}): {}",
                provider, status, source
            ),
            ProviderError::Rejected {
                provider,
                status,
                kind,
                message,
            } => write!(
                f,
                "{}: expected \"success\" but got {:?} with message {:?} (status code {})",
                provider, kind, message, status
            ),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProviderError::Transport { source, .. } => Some(source),
            ProviderError::MalformedResponse { source, .. } => Some(source),
            _ => None,
        }
    }
}
