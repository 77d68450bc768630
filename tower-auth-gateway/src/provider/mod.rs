use log::info;

use crate::error::{ProviderError, StartupError};
use crate::provider::oauth::{OAuthCredentials, OAuthProvider, OAuthProviderKind};
use crate::provider::sms::SmsProvider;

/// Identity provider instances for social sign-in.
///
/// Construction-time credential binding only; the OAuth exchange flow is
/// the caller's business.
pub mod oauth;

/// [SmsProvider](crate::provider::sms::SmsProvider) is the capability
/// contract shared by every SMS-capable adapter, together with the
/// supported delivery channels.
pub mod sms;

mod msg91;

pub use crate::provider::msg91::{Msg91Config, Msg91Provider};

/// Registry of constructed, credential-bound provider instances.
///
/// The supported set is closed: lookups dispatch over an enumerated list
/// of integrations, not an open-ended table. Every instance is built and
/// validated by [ProviderRegistryBuilder::build], so a lookup never
/// constructs anything and never fails with a configuration error, only
/// with [ProviderError::NotFound](crate::error::ProviderError::NotFound).
pub struct ProviderRegistry {
    github: Option<OAuthProvider>,
    bitbucket: Option<OAuthProvider>,
    gitlab: Option<OAuthProvider>,
    msg91: Option<Msg91Provider>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::new()
    }

    /// Look up an identity provider by name, case-insensitively.
    pub fn oauth_provider(&self, name: &str) -> Result<&OAuthProvider, ProviderError> {
        let provider = match name.to_ascii_lowercase().as_str() {
            "github" => self.github.as_ref(),
            "bitbucket" => self.bitbucket.as_ref(),
            "gitlab" => self.gitlab.as_ref(),
            _ => None,
        };
        provider.ok_or_else(|| ProviderError::NotFound(name.to_owned()))
    }

    /// Look up an SMS-capable provider by name, case-insensitively.
    pub fn sms_provider(&self, name: &str) -> Result<&dyn SmsProvider, ProviderError> {
        let provider = match name.to_ascii_lowercase().as_str() {
            "msg91" => self.msg91.as_ref().map(|p| p as &dyn SmsProvider),
            _ => None,
        };
        provider.ok_or_else(|| ProviderError::NotFound(name.to_owned()))
    }
}

pub struct ProviderRegistryBuilder {
    github: Option<OAuthCredentials>,
    bitbucket: Option<OAuthCredentials>,
    gitlab: Option<OAuthCredentials>,
    msg91: Option<Msg91Config>,
}

impl ProviderRegistryBuilder {
    fn new() -> Self {
        ProviderRegistryBuilder {
            github: None,
            bitbucket: None,
            gitlab: None,
            msg91: None,
        }
    }

    pub fn github(mut self, credentials: OAuthCredentials) -> Self {
        self.github = Some(credentials);
        self
    }

    pub fn bitbucket(mut self, credentials: OAuthCredentials) -> Self {
        self.bitbucket = Some(credentials);
        self
    }

    pub fn gitlab(mut self, credentials: OAuthCredentials) -> Self {
        self.gitlab = Some(credentials);
        self
    }

    pub fn msg91(mut self, config: Msg91Config) -> Self {
        self.msg91 = Some(config);
        self
    }

    /// Construct every configured provider.
    ///
    /// Credential validation happens here rather than on first use, so a
    /// misconfigured provider fails the process at startup instead of
    /// failing a user request later.
    pub fn build(self) -> Result<ProviderRegistry, StartupError> {
        let registry = ProviderRegistry {
            github: self
                .github
                .map(|c| OAuthProvider::new(OAuthProviderKind::Github, c))
                .transpose()?,
            bitbucket: self
                .bitbucket
                .map(|c| OAuthProvider::new(OAuthProviderKind::Bitbucket, c))
                .transpose()?,
            gitlab: self
                .gitlab
                .map(|c| OAuthProvider::new(OAuthProviderKind::Gitlab, c))
                .transpose()?,
            msg91: self.msg91.map(Msg91Provider::new).transpose()?,
        };

        let mut configured = Vec::new();
        if registry.github.is_some() {
            configured.push("github");
        }
        if registry.bitbucket.is_some() {
            configured.push("bitbucket");
        }
        if registry.gitlab.is_some() {
            configured.push("gitlab");
        }
        if registry.msg91.is_some() {
            configured.push("msg91");
        }
        info!("Configured providers: [{}]", configured.join(", "));

        Ok(registry)
    }
}

impl Default for ProviderRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
