use std::fmt::Display;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::ProviderError;

/// Delivery channel for an outbound one-time passcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Voice,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Voice => "voice",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability contract shared by every SMS-capable provider.
///
/// `send_message` performs exactly one delivery attempt; retry policy, if
/// any, belongs to the caller. The `Ok` value is the provider-reported
/// message text or identifier.
///
/// On failure the error is authoritative:
/// [ProviderError::Rejected](crate::error::ProviderError::Rejected) still
/// carries the provider's message text for diagnostic display, and
/// non-empty text must never be taken as success.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Name the provider is registered under.
    fn name(&self) -> &'static str;

    /// Deliver `body` carrying one-time code `code` to `recipient` over
    /// `channel`.
    async fn send_message(
        &self,
        recipient: &str,
        body: &str,
        channel: Channel,
        code: &str,
    ) -> Result<String, ProviderError>;
}
