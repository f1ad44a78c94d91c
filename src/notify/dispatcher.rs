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

//! Emergency notification dispatch.
//!
//! Builds the severity-typed message body for an emergency, normalizes the
//! destination number, and hands delivery to the channel provider. A missing
//! or unusable contact number short-circuits before any channel call; a
//! degraded or failing channel comes back as a structured outcome so the
//! emergency flow itself never crashes over notification problems.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::constants::sms;
use crate::notify::channel::{SendOutcome, SmsChannel};
use crate::notify::phone::format_phone_number;
use crate::utils::time;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Emergency contact phone number not available.")]
    MissingContactPhone,
    #[error("Invalid phone number format.")]
    InvalidPhoneNumber,
}

/// Closed set of emergency types, with an open default branch for anything
/// the templates do not special-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmergencyKind {
    Sos,
    GeofenceBreach,
    GeofenceExit,
    Other(String),
}

impl EmergencyKind {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "sos" => Self::Sos,
            "geofence_breach" => Self::GeofenceBreach,
            "geofence_exit" => Self::GeofenceExit,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Sos => "sos",
            Self::GeofenceBreach => "geofence_breach",
            Self::GeofenceExit => "geofence_exit",
            Self::Other(label) => label,
        }
    }
}

/// Decrypted emergency-contact bundle handed to the dispatcher.
#[derive(Debug, Clone)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Compose the message body for one emergency. Pure function of its inputs;
/// the wording per type is an observable contract that downstream consumers
/// assert on.
pub fn compose_message(
    kind: &EmergencyKind,
    tourist_name: &str,
    tourist_id: &str,
    location: &str,
    timestamp: &str,
) -> String {
    match kind {
        EmergencyKind::Sos => format!(
            "🚨 URGENT: {tourist_name} has triggered SOS emergency!\n\n\
             Tourist ID: {tourist_id}\n\
             Location: {location}\n\
             Time: {timestamp}\n\n\
             Please contact authorities immediately.\n\n\
             This is an automated alert from the Tourist Safety System."
        ),
        EmergencyKind::GeofenceBreach => format!(
            "⚠️ ALERT: {tourist_name} entered a restricted area!\n\n\
             Tourist ID: {tourist_id}\n\
             Location: {location}\n\
             Time: {timestamp}\n\n\
             Please check on {tourist_name} if possible.\n\n\
             Tourist Safety System Alert."
        ),
        EmergencyKind::GeofenceExit => format!(
            "✅ UPDATE: {tourist_name} exited restricted area.\n\n\
             Tourist ID: {tourist_id}\n\
             Location: {location}\n\
             Time: {timestamp}\n\n\
             Tourist Safety System Update."
        ),
        EmergencyKind::Other(label) => format!(
            "📱 ALERT: {tourist_name} - {label}\n\n\
             Tourist ID: {tourist_id}\n\
             Location: {location}\n\
             Time: {timestamp}\n\n\
             Tourist Safety System Alert."
        ),
    }
}

pub struct EmergencyDispatcher {
    channel: Arc<dyn SmsChannel>,
}

impl EmergencyDispatcher {
    pub fn new(channel: Arc<dyn SmsChannel>) -> Self {
        Self { channel }
    }

    /// Compose and deliver one emergency notification.
    ///
    /// Fails fast with [`NotifyError`] when no deliverable destination
    /// exists; every channel-side problem, including a degraded provider,
    /// is reported inside the returned [`SendOutcome`].
    pub async fn send_emergency(
        &self,
        contact: &EmergencyContact,
        tourist_name: &str,
        tourist_id: &str,
        kind: &EmergencyKind,
        location: Option<&str>,
    ) -> Result<SendOutcome, NotifyError> {
        if contact.phone.trim().is_empty() {
            return Err(NotifyError::MissingContactPhone);
        }
        let destination =
            format_phone_number(&contact.phone).ok_or(NotifyError::InvalidPhoneNumber)?;

        let location = location.unwrap_or(sms::DEFAULT_LOCATION);
        let message = compose_message(kind, tourist_name, tourist_id, location, &time::now_human());

        debug!(
            tourist = tourist_id,
            kind = kind.label(),
            to = %destination,
            "dispatching emergency notification"
        );
        Ok(self
            .channel
            .send(&destination, &message, sms::SENDER_LABEL)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::channel::DisabledChannel;

    fn contact(phone: &str) -> EmergencyContact {
        EmergencyContact {
            name: "Jordan Reyes".into(),
            phone: phone.into(),
            email: "jr@example.com".into(),
        }
    }

    #[test]
    fn kind_parsing_covers_the_closed_set() {
        assert_eq!(EmergencyKind::parse("sos"), EmergencyKind::Sos);
        assert_eq!(EmergencyKind::parse("SOS"), EmergencyKind::Sos);
        assert_eq!(
            EmergencyKind::parse("geofence_breach"),
            EmergencyKind::GeofenceBreach
        );
        assert_eq!(
            EmergencyKind::parse("geofence_exit"),
            EmergencyKind::GeofenceExit
        );
        assert_eq!(
            EmergencyKind::parse("medical"),
            EmergencyKind::Other("medical".into())
        );
    }

    #[test]
    fn sos_template_is_urgent_and_complete() {
        let msg = compose_message(
            &EmergencyKind::Sos,
            "Amira Khan",
            "TID-8F92A1B3",
            "North Gate",
            "8/5/2026, 2:30:15 PM",
        );
        assert!(msg.starts_with("🚨 URGENT: Amira Khan has triggered SOS emergency!"));
        assert!(msg.contains("Tourist ID: TID-8F92A1B3"));
        assert!(msg.contains("Location: North Gate"));
        assert!(msg.contains("Time: 8/5/2026, 2:30:15 PM"));
        assert!(msg.contains("Please contact authorities immediately."));
    }

    #[test]
    fn geofence_templates_differ_in_urgency() {
        let breach = compose_message(
            &EmergencyKind::GeofenceBreach,
            "Amira Khan",
            "TID-8F92A1B3",
            "Zone B",
            "t",
        );
        let exit = compose_message(
            &EmergencyKind::GeofenceExit,
            "Amira Khan",
            "TID-8F92A1B3",
            "Zone B",
            "t",
        );
        assert!(breach.starts_with("⚠️ ALERT:"));
        assert!(breach.contains("Please check on Amira Khan if possible."));
        assert!(exit.starts_with("✅ UPDATE:"));
        assert!(!exit.contains("URGENT"));
    }

    #[test]
    fn default_template_names_the_kind() {
        let msg = compose_message(
            &EmergencyKind::Other("medical".into()),
            "Amira Khan",
            "TID-8F92A1B3",
            "Zone B",
            "t",
        );
        assert!(msg.starts_with("📱 ALERT: Amira Khan - medical"));
    }

    #[tokio::test]
    async fn missing_phone_short_circuits() {
        let dispatcher = EmergencyDispatcher::new(Arc::new(DisabledChannel::new()));
        let err = dispatcher
            .send_emergency(&contact("  "), "Amira", "TID-00000000", &EmergencyKind::Sos, None)
            .await
            .unwrap_err();
        assert_eq!(err, NotifyError::MissingContactPhone);
    }

    #[tokio::test]
    async fn unusable_phone_short_circuits() {
        let dispatcher = EmergencyDispatcher::new(Arc::new(DisabledChannel::new()));
        let err = dispatcher
            .send_emergency(&contact("123"), "Amira", "TID-00000000", &EmergencyKind::Sos, None)
            .await
            .unwrap_err();
        assert_eq!(err, NotifyError::InvalidPhoneNumber);
    }

    #[tokio::test]
    async fn degraded_channel_yields_a_simulated_outcome() {
        let dispatcher = EmergencyDispatcher::new(Arc::new(DisabledChannel::new()));
        let outcome = dispatcher
            .send_emergency(
                &contact("1234567890"),
                "Amira",
                "TID-00000000",
                &EmergencyKind::Sos,
                Some("North Gate"),
            )
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.simulated);
        assert_eq!(outcome.to.as_deref(), Some("+11234567890"));
    }
}
