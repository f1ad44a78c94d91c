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

//! Process-wide configuration.
//!
//! The field-encryption key is required and its absence is a startup error,
//! never a per-request one. Channel-provider credentials are optional; their
//! absence only degrades SMS delivery.

use crate::constants::{cipher, config as env_names};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingKey(&'static str),
    #[error("{0} must be {1} hex characters ({2} bytes)")]
    InvalidKeyLength(&'static str, usize, usize),
    #[error("{0} is not valid hex: {1}")]
    InvalidKeyEncoding(&'static str, hex::FromHexError),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// AES-256 key protecting every encrypted field, loaded once at startup.
    pub cipher_key: [u8; cipher::KEY_LENGTH],
    pub log_level: String,
    pub log_format: String, // "json" or "text"
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_number: Option<String>,
    pub sms_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let key_hex = env::var(env_names::ENV_SECRET_KEY)
            .map_err(|_| ConfigError::MissingKey(env_names::ENV_SECRET_KEY))?;

        Ok(Self {
            cipher_key: parse_secret_key(&key_hex)?,
            log_level: env::var(env_names::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(env_names::ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string()),
            twilio_account_sid: env::var(env_names::ENV_TWILIO_ACCOUNT_SID).ok(),
            twilio_auth_token: env::var(env_names::ENV_TWILIO_AUTH_TOKEN).ok(),
            twilio_from_number: env::var(env_names::ENV_TWILIO_PHONE_NUMBER).ok(),
            sms_enabled: env::var(env_names::ENV_SMS_ENABLED)
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        })
    }
}

/// Parse the hex-encoded secret key into raw AES-256 key bytes.
pub fn parse_secret_key(key_hex: &str) -> Result<[u8; cipher::KEY_LENGTH], ConfigError> {
    let bytes = hex::decode(key_hex.trim())
        .map_err(|e| ConfigError::InvalidKeyEncoding(env_names::ENV_SECRET_KEY, e))?;

    if bytes.len() != cipher::KEY_LENGTH {
        return Err(ConfigError::InvalidKeyLength(
            env_names::ENV_SECRET_KEY,
            cipher::KEY_LENGTH * 2,
            cipher::KEY_LENGTH,
        ));
    }
    let mut key = [0u8; cipher::KEY_LENGTH];
    key.copy_from_slice(&bytes);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_length_hex_key() {
        let key_hex = "00".repeat(cipher::KEY_LENGTH);
        let key = parse_secret_key(&key_hex).unwrap();
        assert_eq!(key, [0u8; cipher::KEY_LENGTH]);
    }

    #[test]
    fn rejects_short_keys() {
        let err = parse_secret_key("deadbeef").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyLength(..)));
    }

    #[test]
    fn rejects_non_hex_keys() {
        let err = parse_secret_key(&"zz".repeat(cipher::KEY_LENGTH)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyEncoding(..)));
    }
}
