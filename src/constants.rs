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

//! trailguard constants - Single source of truth for all configuration values.
//!
//! This module centralizes magic numbers, field lists, and configuration
//! constants to ensure consistency and maintainability.

/// Field-level encryption constants
pub mod cipher {
    /// AES-256 key length in bytes
    pub const KEY_LENGTH: usize = 32;
    /// AES-GCM nonce length in bytes (96 bits)
    pub const NONCE_LENGTH: usize = 12;
}

/// Encrypted-at-rest field sets per record family
pub mod fields {
    /// Tourist fields stored as ciphertext
    pub const TOURIST_ENCRYPTED: &[&str] = &[
        "full_name",
        "nationality",
        "passport",
        "phone",
        "email",
        "emergency_contact_name",
        "emergency_contact_phone",
        "emergency_contact_email",
        "password",
    ];
    /// Tourist fields decrypted for profile responses (password excluded)
    pub const TOURIST_PROFILE: &[&str] = &[
        "full_name",
        "nationality",
        "passport",
        "phone",
        "email",
        "emergency_contact_name",
        "emergency_contact_phone",
        "emergency_contact_email",
    ];
    /// Tourist fields decrypted when dispatching an emergency
    pub const TOURIST_EMERGENCY: &[&str] = &[
        "full_name",
        "emergency_contact_name",
        "emergency_contact_phone",
        "emergency_contact_email",
    ];
    /// Authority fields stored as ciphertext
    pub const AUTHORITY_ENCRYPTED: &[&str] = &["username", "password", "name"];
    /// Authority fields decrypted for session responses (password excluded)
    pub const AUTHORITY_PROFILE: &[&str] = &["username", "name"];
}

/// Identifier formats
pub mod ids {
    /// Tourist id prefix, followed by 8 uppercase hex characters
    pub const TOURIST_ID_PREFIX: &str = "TID-";
    /// Hex characters carried after the tourist id prefix
    pub const TOURIST_ID_HEX_LENGTH: usize = 8;
    /// Mock transaction hash prefix
    pub const TX_HASH_PREFIX: &str = "0x";
    /// Random bytes behind a mock transaction hash
    pub const TX_HASH_BYTES: usize = 32;
}

/// Outbound SMS constants
pub mod sms {
    /// Sender label attached to every dispatched message
    pub const SENDER_LABEL: &str = "Tourist Safety System";
    /// Location placeholder when an emergency carries none
    pub const DEFAULT_LOCATION: &str = "Demo Map Zone";
    /// Twilio Messages REST API base
    pub const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";
}

/// Listing limits
pub mod listing {
    /// Maximum alerts returned by the recent-alerts feed
    pub const RECENT_ALERTS_LIMIT: usize = 50;
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_SECRET_KEY: &str = "TRAILGUARD_SECRET_KEY";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
    pub const ENV_TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
    pub const ENV_TWILIO_PHONE_NUMBER: &str = "TWILIO_PHONE_NUMBER";
    pub const ENV_SMS_ENABLED: &str = "SMS_ENABLED";
}
