// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Outbound SMS channel providers.
//!
//! The dispatcher depends only on the `SmsChannel` capability surface, never
//! on a concrete transport. `configure` builds the provider value once at
//! startup: a live Twilio client when credentials are present, otherwise a
//! disabled channel that simulates sends instead of raising. Delivery
//! failures are data, not errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::sms;

/// Channel health report.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStatus {
    pub enabled: bool,
    pub configured: bool,
    pub provider: &'static str,
    pub from_number: Option<String>,
}

/// Structured delivery result. `send` never raises; everything a caller may
/// need to report lives here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Abstracted outbound-message transport.
#[async_trait]
pub trait SmsChannel: Send + Sync {
    fn is_available(&self) -> bool;
    fn status(&self) -> ChannelStatus;
    /// Deliver `body` to an E.164 `destination`. Infallible by contract:
    /// transport and configuration failures come back inside the outcome.
    async fn send(&self, destination: &str, body: &str, sender_label: &str) -> SendOutcome;
}

/// Build the channel provider from process configuration.
pub fn configure(config: &Config) -> Arc<dyn SmsChannel> {
    let (sid, token) = match (&config.twilio_account_sid, &config.twilio_auth_token) {
        (Some(sid), Some(token)) => (sid.clone(), token.clone()),
        _ => {
            warn!("Twilio credentials not found. SMS functionality disabled.");
            return Arc::new(DisabledChannel { configured: false });
        }
    };

    if !config.sms_enabled {
        info!("SMS functionality disabled via SMS_ENABLED environment variable");
        return Arc::new(DisabledChannel { configured: true });
    }

    info!("Twilio SMS channel initialized");
    Arc::new(TwilioChannel {
        http: reqwest::Client::new(),
        account_sid: sid,
        auth_token: token,
        from_number: config.twilio_from_number.clone(),
    })
}

/// Channel used when credentials are absent or SMS is switched off.
/// Sends are simulated: the outcome reports failure without raising.
pub struct DisabledChannel {
    configured: bool,
}

impl DisabledChannel {
    pub fn new() -> Self {
        Self { configured: false }
    }
}

impl Default for DisabledChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsChannel for DisabledChannel {
    fn is_available(&self) -> bool {
        false
    }

    fn status(&self) -> ChannelStatus {
        ChannelStatus {
            enabled: false,
            configured: self.configured,
            provider: "twilio",
            from_number: None,
        }
    }

    async fn send(&self, destination: &str, _body: &str, _sender_label: &str) -> SendOutcome {
        debug!(to = destination, "SMS disabled - simulating send");
        SendOutcome {
            success: false,
            simulated: true,
            to: Some(destination.to_string()),
            error: Some("SMS service not available".to_string()),
            ..SendOutcome::default()
        }
    }
}

/// Live channel delivering over the Twilio Messages REST API.
pub struct TwilioChannel {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: Option<String>,
}

#[async_trait]
impl SmsChannel for TwilioChannel {
    fn is_available(&self) -> bool {
        true
    }

    fn status(&self) -> ChannelStatus {
        ChannelStatus {
            enabled: true,
            configured: true,
            provider: "twilio",
            from_number: self.from_number.clone(),
        }
    }

    async fn send(&self, destination: &str, body: &str, sender_label: &str) -> SendOutcome {
        let Some(from) = &self.from_number else {
            warn!("Twilio phone number not configured");
            return SendOutcome {
                success: false,
                to: Some(destination.to_string()),
                error: Some("Twilio phone number not configured".to_string()),
                ..SendOutcome::default()
            };
        };

        debug!(to = destination, sender = sender_label, "sending SMS");

        let url = format!(
            "{}/Accounts/{}/Messages.json",
            sms::TWILIO_API_BASE,
            self.account_sid
        );
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", destination), ("From", from.as_str()), ("Body", body)])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<TwilioMessageResponse>().await {
                Ok(msg) => {
                    info!(to = destination, sid = %msg.sid, "SMS sent successfully");
                    SendOutcome {
                        success: true,
                        message_id: Some(msg.sid),
                        status: msg.status,
                        to: Some(destination.to_string()),
                        ..SendOutcome::default()
                    }
                }
                Err(e) => SendOutcome {
                    success: false,
                    to: Some(destination.to_string()),
                    error: Some(format!("unreadable provider response: {e}")),
                    ..SendOutcome::default()
                },
            },
            Ok(resp) => {
                let status = resp.status();
                let detail = resp
                    .json::<TwilioErrorResponse>()
                    .await
                    .ok()
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| format!("provider returned HTTP {status}"));
                warn!(to = destination, error = %detail, "SMS delivery rejected");
                SendOutcome {
                    success: false,
                    to: Some(destination.to_string()),
                    error: Some(detail),
                    ..SendOutcome::default()
                }
            }
            Err(e) => {
                warn!(to = destination, error = %e, "SMS transport error");
                SendOutcome {
                    success: false,
                    to: Some(destination.to_string()),
                    error: Some(e.to_string()),
                    ..SendOutcome::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_without_credentials() -> Config {
        Config {
            cipher_key: [0u8; 32],
            log_level: "info".into(),
            log_format: "text".into(),
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_from_number: None,
            sms_enabled: true,
        }
    }

    #[test]
    fn missing_credentials_degrade_to_a_disabled_channel() {
        let channel = configure(&config_without_credentials());
        assert!(!channel.is_available());
        let status = channel.status();
        assert!(!status.enabled);
        assert!(!status.configured);
    }

    #[test]
    fn env_switch_disables_a_configured_channel() {
        let config = Config {
            twilio_account_sid: Some("AC123".into()),
            twilio_auth_token: Some("token".into()),
            sms_enabled: false,
            ..config_without_credentials()
        };
        let channel = configure(&config);
        assert!(!channel.is_available());
        let status = channel.status();
        assert!(!status.enabled);
        assert!(status.configured);
    }

    #[test]
    fn full_credentials_enable_the_channel() {
        let config = Config {
            twilio_account_sid: Some("AC123".into()),
            twilio_auth_token: Some("token".into()),
            twilio_from_number: Some("+15550009999".into()),
            ..config_without_credentials()
        };
        let channel = configure(&config);
        assert!(channel.is_available());
        let status = channel.status();
        assert!(status.enabled && status.configured);
        assert_eq!(status.from_number.as_deref(), Some("+15550009999"));
    }

    #[tokio::test]
    async fn disabled_channel_simulates_instead_of_raising() {
        let channel = DisabledChannel::new();
        let outcome = channel.send("+15550001111", "body", sms::SENDER_LABEL).await;
        assert!(!outcome.success);
        assert!(outcome.simulated);
        assert_eq!(outcome.to.as_deref(), Some("+15550001111"));
    }

    #[tokio::test]
    async fn live_channel_without_from_number_fails_structurally() {
        let channel = TwilioChannel {
            http: reqwest::Client::new(),
            account_sid: "AC123".into(),
            auth_token: "token".into(),
            from_number: None,
        };
        let outcome = channel.send("+15550001111", "body", sms::SENDER_LABEL).await;
        assert!(!outcome.success);
        assert!(!outcome.simulated);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Twilio phone number not configured")
        );
    }
}
