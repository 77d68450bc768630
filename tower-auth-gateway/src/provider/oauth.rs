use url::Url;

use crate::error::StartupError;

/// Identity providers supported for social sign-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProviderKind {
    Github,
    Bitbucket,
    Gitlab,
}

impl OAuthProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProviderKind::Github => "github",
            OAuthProviderKind::Bitbucket => "bitbucket",
            OAuthProviderKind::Gitlab => "gitlab",
        }
    }
}

/// Client credentials for one OAuth provider.
#[derive(Clone, Debug, Default)]
pub struct OAuthCredentials {
    pub client_key: String,
    pub client_secret: String,
}

/// A constructed identity provider instance.
///
/// Binds one set of client credentials to the provider's fixed endpoints.
/// The OAuth exchange itself is carried out by the caller; the instance
/// guarantees correct credential binding and is safe to share across
/// concurrent requests.
#[derive(Clone, Debug)]
pub struct OAuthProvider {
    kind: OAuthProviderKind,
    client_key: String,
    client_secret: String,
    authorize_url: Url,
    token_url: Url,
    profile_url: Url,
}

impl OAuthProvider {
    pub(crate) fn new(
        kind: OAuthProviderKind,
        credentials: OAuthCredentials,
    ) -> Result<Self, StartupError> {
        if credentials.client_key.is_empty() {
            return Err(misconfigured(kind, "missing client key"));
        }
        if credentials.client_secret.is_empty() {
            return Err(misconfigured(kind, "missing client secret"));
        }

        let (authorize, token, profile) = endpoints(kind);
        Ok(OAuthProvider {
            kind,
            client_key: credentials.client_key,
            client_secret: credentials.client_secret,
            authorize_url: parse_endpoint(kind, authorize)?,
            token_url: parse_endpoint(kind, token)?,
            profile_url: parse_endpoint(kind, profile)?,
        })
    }

    pub fn kind(&self) -> OAuthProviderKind {
        self.kind
    }

    pub fn client_key(&self) -> &str {
        &self.client_key
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    pub fn profile_url(&self) -> &Url {
        &self.profile_url
    }
}

fn endpoints(kind: OAuthProviderKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        OAuthProviderKind::Github => (
            "https://github.com/login/oauth/authorize",
            "https://github.com/login/oauth/access_token",
            "https://api.github.com/user",
        ),
        OAuthProviderKind::Bitbucket => (
            "https://bitbucket.org/site/oauth2/authorize",
            "https://bitbucket.org/site/oauth2/access_token",
            "https://api.bitbucket.org/2.0/user",
        ),
        OAuthProviderKind::Gitlab => (
            "https://gitlab.com/oauth/authorize",
            "https://gitlab.com/oauth/token",
            "https://gitlab.com/api/v4/user",
        ),
    }
}

fn parse_endpoint(kind: OAuthProviderKind, endpoint: &str) -> Result<Url, StartupError> {
    Url::parse(endpoint).map_err(|_| misconfigured(kind, "invalid endpoint URL"))
}

fn misconfigured(kind: OAuthProviderKind, reason: &str) -> StartupError {
    StartupError::MisconfiguredProvider {
        provider: kind.as_str().to_owned(),
        reason: reason.to_owned(),
    }
}
