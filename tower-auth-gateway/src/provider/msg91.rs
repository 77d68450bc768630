use std::time::Duration;

use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{ProviderError, StartupError},
    provider::sms::{Channel, SmsProvider},
};

const PROVIDER_NAME: &str = "msg91";
const DEFAULT_API_BASE: &str = "https://control.msg91.com/api/v5/flow";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const AUTH_KEY_HEADER: &str = "authkey";
const SUCCESS_SENTINEL: &str = "success";

/// Credentials and tuning for the Msg91 flow API.
#[derive(Clone, Debug, Default)]
pub struct Msg91Config {
    pub auth_key: String,
    pub template_id: String,
    /// Overrides the flow API endpoint.
    pub api_base: Option<Url>,
    /// Upper bound for one outbound call. Defaults to 10 seconds; on
    /// expiry the call aborts and surfaces as a transport error.
    pub timeout: Option<Duration>,
}

impl Msg91Config {
    fn validate(&self) -> Result<(), StartupError> {
        if self.auth_key.is_empty() {
            return Err(misconfigured("missing auth key"));
        }
        if self.template_id.is_empty() {
            return Err(misconfigured("missing template id"));
        }
        Ok(())
    }
}

/// Delivers one-time passcodes through the Msg91 flow API.
///
/// Holds no per-call state; the bound configuration and the underlying
/// HTTP client are both safe for concurrent reuse.
pub struct Msg91Provider {
    config: Msg91Config,
    api_base: Url,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct FlowRequest<'a> {
    template_id: &'a str,
    recipients: [FlowRecipient<'a>; 1],
}

#[derive(Serialize)]
struct FlowRecipient<'a> {
    mobiles: &'a str,
    otp: &'a str,
}

#[derive(Deserialize)]
struct FlowResponse {
    message: String,
    #[serde(rename = "type")]
    kind: String,
}

impl Msg91Provider {
    pub fn new(config: Msg91Config) -> Result<Self, StartupError> {
        config.validate()?;

        let api_base = match config.api_base.clone() {
            Some(api_base) => api_base,
            None => Url::parse(DEFAULT_API_BASE)
                .map_err(|_| misconfigured("invalid API base URL"))?,
        };
        let client = reqwest::Client::builder()
            .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| misconfigured(&e.to_string()))?;

        Ok(Msg91Provider {
            config,
            api_base,
            client,
        })
    }

    async fn send_sms(&self, phone: &str, otp: &str) -> Result<String, ProviderError> {
        let payload = FlowRequest {
            template_id: &self.config.template_id,
            recipients: [FlowRecipient {
                mobiles: phone,
                otp,
            }],
        };

        let response = self
            .client
            .post(self.api_base.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTH_KEY_HEADER, &self.config.auth_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Transport {
                provider: PROVIDER_NAME,
                source: e,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ProviderError::Transport {
            provider: PROVIDER_NAME,
            source: e,
        })?;
        debug!("msg91 response ({}): {}", status, body);

        let parsed =
            serde_json::from_str::<FlowResponse>(&body).map_err(|e| {
                ProviderError::MalformedResponse {
                    provider: PROVIDER_NAME,
                    status,
                    source: e,
                }
            })?;

        if parsed.kind != SUCCESS_SENTINEL {
            return Err(ProviderError::Rejected {
                provider: PROVIDER_NAME,
                status,
                kind: parsed.kind,
                message: parsed.message,
            });
        }
        Ok(parsed.message)
    }
}

#[async_trait]
impl SmsProvider for Msg91Provider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    // The message text lives in the registered template, so `body` is
    // not part of the wire payload.
    async fn send_message(
        &self,
        recipient: &str,
        _body: &str,
        channel: Channel,
        code: &str,
    ) -> Result<String, ProviderError> {
        match channel {
            Channel::Sms => self.send_sms(recipient, code).await,
            other => Err(ProviderError::UnsupportedChannel {
                provider: PROVIDER_NAME,
                channel: other,
            }),
        }
    }
}

fn misconfigured(reason: &str) -> StartupError {
    StartupError::MisconfiguredProvider {
        provider: PROVIDER_NAME.to_owned(),
        reason: reason.to_owned(),
    }
}
