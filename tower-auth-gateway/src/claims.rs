use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};

/// Default claims implementation
///
/// Will be used by default when constructing an [AuthGateway](crate::gateway::AuthGateway).
/// If you need other ones, an own struct can be provided
/// as generic parameter.
///
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DefaultClaims {
    pub iss: Option<String>,
    pub sub: Option<String>,
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    #[serde(default)]
    pub aud: Vec<String>,
    pub exp: Option<u64>,
    pub jti: Option<String>,
}

impl Display for DefaultClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
