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

//! Domain models for the registry.
//!
//! Pure data structures for tourist, authority, and alert records. Records
//! carry a mix of plaintext fields (identifiers, timestamps) and fields that
//! hold ciphertext at rest; the same struct shape is used on both sides of
//! the codec, mirroring how rows move through the store.

use rand::Rng as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::constants::ids;

/// Newtype wrapper for tourist identifiers (`TID-` + 8 uppercase hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouristId(String);

impl TouristId {
    /// Mint a fresh identifier from random UUID material.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}{}",
            ids::TOURIST_ID_PREFIX,
            hex[..ids::TOURIST_ID_HEX_LENGTH].to_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TouristId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mint a mock blockchain transaction hash: `0x` + 64 lowercase hex chars.
pub fn mint_tx_hash() -> String {
    let mut bytes = [0u8; ids::TX_HASH_BYTES];
    rand::rng().fill(&mut bytes);
    format!("{}{}", ids::TX_HASH_PREFIX, hex::encode(bytes))
}

/// A persisted tourist row. All PII and credential fields hold ciphertext at
/// rest; `id`, `tx_hash`, and `created_at` stay plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouristRecord {
    pub id: TouristId,
    pub full_name: String,
    pub nationality: String,
    pub passport: String,
    pub phone: String,
    pub email: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_email: String,
    pub password: String,
    pub tx_hash: String,
    pub created_at: String,
}

/// Registration input, plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTourist {
    pub full_name: String,
    pub nationality: String,
    pub passport: String,
    pub phone: String,
    pub email: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_email: String,
    pub password: String,
}

/// Decrypted tourist profile, safe to echo to the record owner. The
/// password never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouristProfile {
    pub full_name: String,
    pub nationality: String,
    pub passport: String,
    pub phone: String,
    pub email: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_email: String,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub tourist_id: TouristId,
    pub tx_hash: String,
    pub created_at: String,
    pub profile: TouristProfile,
}

/// Outcome of a successful tourist login.
#[derive(Debug, Clone, Serialize)]
pub struct TouristSession {
    pub tourist_id: TouristId,
    pub profile: TouristProfile,
    pub tx_hash: String,
    pub created_at: String,
}

/// A decrypted dashboard row.
#[derive(Debug, Clone, Serialize)]
pub struct TouristOverview {
    pub tourist_id: TouristId,
    pub profile: TouristProfile,
    pub created_at: String,
}

/// A persisted authority row. `username`, `password`, and `name` hold
/// ciphertext at rest; `role` and `created_at` stay plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityRecord {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

/// Authority account input, plaintext.
#[derive(Debug, Clone)]
pub struct NewAuthority {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

/// Outcome of a successful authority login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthoritySession {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: String,
}

/// A persisted alert row, fully plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    pub alert_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: String,
    pub tourist_id: String,
    pub severity: String,
    pub created_at: String,
}

/// Alert input as reported by the triggering client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    pub alert_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: String,
    pub tourist_id: String,
    pub severity: String,
}

/// Flatten a record into the field map the codec consumes.
pub(crate) fn to_field_map<T: Serialize>(record: &T) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        // Records are plain structs; anything else is a programming error
        // surfaced as an empty map that the codec passes through untouched.
        _ => Map::new(),
    }
}

/// Rebuild a record from a field map produced by the codec.
pub(crate) fn from_field_map<T: DeserializeOwned>(
    map: Map<String, Value>,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tourist_ids_follow_the_documented_format() {
        let id = TouristId::generate();
        let s = id.as_str();
        assert!(s.starts_with(ids::TOURIST_ID_PREFIX));
        let suffix = &s[ids::TOURIST_ID_PREFIX.len()..];
        assert_eq!(suffix.len(), ids::TOURIST_ID_HEX_LENGTH);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn tourist_ids_are_random() {
        assert_ne!(TouristId::generate(), TouristId::generate());
    }

    #[test]
    fn tx_hashes_look_like_real_ones() {
        let hash = mint_tx_hash();
        assert!(hash.starts_with(ids::TX_HASH_PREFIX));
        assert_eq!(hash.len(), 2 + ids::TX_HASH_BYTES * 2);
        assert!(hash[2..]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn records_survive_the_field_map_round_trip() {
        let record = TouristRecord {
            id: TouristId::generate(),
            full_name: "Ada Lovelace".into(),
            nationality: "British".into(),
            passport: "P123".into(),
            phone: "+441234567890".into(),
            email: String::new(),
            emergency_contact_name: "Charles".into(),
            emergency_contact_phone: "+441234567891".into(),
            emergency_contact_email: "cb@example.com".into(),
            password: "secret".into(),
            tx_hash: mint_tx_hash(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };

        let map = to_field_map(&record);
        let back: TouristRecord = from_field_map(map).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.passport, record.passport);
        assert_eq!(back.email, "");
    }
}
