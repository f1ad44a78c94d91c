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

//! Registry service.
//!
//! The central orchestrator: registration with the duplicate-passport gate,
//! decrypt-and-compare logins, profile retrieval, alert recording, and
//! emergency dispatch. Decrypted plaintext never outlives the request that
//! produced it.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::{fields, listing};
use crate::crypto::cipher::FieldCipher;
use crate::notify::channel::{ChannelStatus, SendOutcome, SmsChannel};
use crate::notify::dispatcher::{EmergencyContact, EmergencyDispatcher, EmergencyKind};
use crate::registry::errors::RegistryError;
use crate::registry::matcher::CredentialMatcher;
use crate::registry::models::{
    from_field_map, mint_tx_hash, to_field_map, AlertRecord, AuthorityRecord, AuthoritySession,
    NewAlert, NewAuthority, NewTourist, Registration, TouristId, TouristOverview, TouristProfile,
    TouristRecord, TouristSession,
};
use crate::registry::store::RecordStore;
use crate::utils::time;

/// Sample authority accounts seeded into an empty store, mirroring the demo
/// deployment's defaults.
const DEFAULT_AUTHORITIES: &[(&str, &str, &str, &str)] = &[
    ("admin", "admin123", "System Administrator", "admin"),
    ("police", "police123", "Police Officer", "police"),
    ("emergency", "emergency123", "Emergency Services", "emergency"),
];

/// Result of an emergency dispatch attempt. Delivery failure is reported,
/// never escalated; the triggering flow has already done its own work.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EmergencyReport {
    pub success: bool,
    pub message: String,
    pub tourist_name: String,
    pub sms: SendOutcome,
}

pub struct Registry {
    cipher: FieldCipher,
    store: Arc<dyn RecordStore>,
    channel: Arc<dyn SmsChannel>,
    dispatcher: EmergencyDispatcher,
}

impl Registry {
    pub fn new(
        config: &Config,
        store: Arc<dyn RecordStore>,
        channel: Arc<dyn SmsChannel>,
    ) -> Self {
        Self {
            cipher: FieldCipher::new(&config.cipher_key),
            store,
            channel: channel.clone(),
            dispatcher: EmergencyDispatcher::new(channel),
        }
    }

    /// Register a tourist. The duplicate gate decrypts every stored passport
    /// because ciphertext cannot be compared directly; two registrations of
    /// the same passport produce different ciphertexts.
    pub async fn register_tourist(&self, new: NewTourist) -> Result<Registration, RegistryError> {
        let matcher = CredentialMatcher::new(&self.cipher);
        if matcher
            .passport_registered(self.store.as_ref(), &new.passport)
            .await?
        {
            return Err(RegistryError::DuplicateRegistration);
        }

        let id = TouristId::generate();
        let tx_hash = mint_tx_hash();
        let created_at = time::now_iso();

        let plain = TouristRecord {
            id: id.clone(),
            full_name: new.full_name,
            nationality: new.nationality,
            passport: new.passport,
            phone: new.phone,
            email: new.email.unwrap_or_default(),
            emergency_contact_name: new.emergency_contact_name,
            emergency_contact_phone: new.emergency_contact_phone,
            emergency_contact_email: new.emergency_contact_email,
            password: new.password,
            tx_hash: tx_hash.clone(),
            created_at: created_at.clone(),
        };
        let profile = profile_of(&plain);

        let encrypted_map = self
            .cipher
            .encrypt_record(to_field_map(&plain), fields::TOURIST_ENCRYPTED);
        let record: TouristRecord = from_field_map(encrypted_map)?;

        self.store.insert_tourist(record).await?;
        info!(tourist = %id, "tourist registered");

        Ok(Registration {
            tourist_id: id,
            tx_hash,
            created_at,
            profile,
        })
    }

    /// Tourist login: full decrypt-and-compare scan. Unknown passport and
    /// wrong password are deliberately indistinguishable.
    pub async fn login_tourist(
        &self,
        passport: &str,
        password: &str,
    ) -> Result<TouristSession, RegistryError> {
        let matcher = CredentialMatcher::new(&self.cipher);
        let record = matcher
            .find_tourist(self.store.as_ref(), passport, password)
            .await?
            .ok_or(RegistryError::InvalidTouristCredentials)?;

        let profile = self.decrypt_profile(&record)?;
        Ok(TouristSession {
            tourist_id: record.id,
            profile,
            tx_hash: record.tx_hash,
            created_at: record.created_at,
        })
    }

    /// Authority login, same scan shape over the authority table.
    pub async fn login_authority(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthoritySession, RegistryError> {
        let matcher = CredentialMatcher::new(&self.cipher);
        let record = matcher
            .find_authority(self.store.as_ref(), username, password)
            .await?
            .ok_or(RegistryError::InvalidAuthorityCredentials)?;

        let decrypted = self
            .cipher
            .decrypt_record(to_field_map(&record), fields::AUTHORITY_PROFILE)
            .map_err(RegistryError::CorruptRecord)?;
        let record: AuthorityRecord = from_field_map(decrypted)?;

        Ok(AuthoritySession {
            id: record.id,
            username: record.username,
            name: record.name,
            role: record.role,
        })
    }

    /// Fetch one tourist by id and decrypt the profile fields.
    pub async fn get_tourist(&self, id: &str) -> Result<TouristProfile, RegistryError> {
        let record = self
            .store
            .get_tourist(id)
            .await?
            .ok_or(RegistryError::TouristNotFound)?;
        self.decrypt_profile(&record)
    }

    /// Decrypted dashboard listing: unique by passport (newest registration
    /// wins), newest first. Records that no longer decrypt are skipped, as
    /// in any other scan.
    pub async fn list_tourists(&self) -> Result<Vec<TouristOverview>, RegistryError> {
        let records = self.store.list_tourists().await?;

        let mut by_passport: Vec<TouristOverview> = Vec::new();
        for record in records {
            let profile = match self.decrypt_profile(&record) {
                Ok(profile) => profile,
                Err(_) => {
                    warn!(tourist = %record.id, "skipping undecryptable record in listing");
                    continue;
                }
            };
            let row = TouristOverview {
                tourist_id: record.id,
                profile,
                created_at: record.created_at,
            };
            match by_passport
                .iter_mut()
                .find(|existing| existing.profile.passport == row.profile.passport)
            {
                Some(existing) => {
                    if row.created_at > existing.created_at {
                        *existing = row;
                    }
                }
                None => by_passport.push(row),
            }
        }

        by_passport.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(by_passport)
    }

    /// Record an alert. The alert is considered recorded regardless of any
    /// later notification outcome.
    pub async fn record_alert(&self, alert: NewAlert) -> Result<AlertRecord, RegistryError> {
        Ok(self.store.insert_alert(alert, time::now_iso()).await?)
    }

    pub async fn recent_alerts(&self) -> Result<Vec<AlertRecord>, RegistryError> {
        Ok(self
            .store
            .recent_alerts(listing::RECENT_ALERTS_LIMIT)
            .await?)
    }

    pub async fn alerts_for_tourist(
        &self,
        tourist_id: &str,
    ) -> Result<Vec<AlertRecord>, RegistryError> {
        Ok(self.store.alerts_for_tourist(tourist_id).await?)
    }

    /// Look up a tourist, decrypt the emergency-contact bundle, and dispatch
    /// a notification. A degraded or failing channel still yields `Ok` with
    /// `success: false`; only a missing tourist, an unusable destination, or
    /// a store failure error out.
    pub async fn send_emergency(
        &self,
        tourist_id: &str,
        kind: &str,
        location: Option<&str>,
    ) -> Result<EmergencyReport, RegistryError> {
        let record = self
            .store
            .get_tourist(tourist_id)
            .await?
            .ok_or(RegistryError::TouristNotFound)?;

        let decrypted = self
            .cipher
            .decrypt_record(to_field_map(&record), fields::TOURIST_EMERGENCY)
            .map_err(RegistryError::CorruptRecord)?;

        let field = |name: &str| -> String {
            decrypted
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let tourist_name = field("full_name");
        let contact = EmergencyContact {
            name: field("emergency_contact_name"),
            phone: field("emergency_contact_phone"),
            email: field("emergency_contact_email"),
        };

        let kind = EmergencyKind::parse(kind);
        let sms = self
            .dispatcher
            .send_emergency(&contact, &tourist_name, tourist_id, &kind, location)
            .await?;

        let message = if sms.success {
            "Emergency SMS sent successfully"
        } else {
            "Failed to send emergency SMS"
        };
        Ok(EmergencyReport {
            success: sms.success,
            message: message.to_string(),
            tourist_name,
            sms,
        })
    }

    /// Seed the sample authority accounts when the table is empty.
    pub async fn seed_default_authorities(&self) -> Result<(), RegistryError> {
        if !self.store.list_authorities().await?.is_empty() {
            return Ok(());
        }

        for (username, password, name, role) in DEFAULT_AUTHORITIES {
            let plain = serde_json::json!({
                "username": username,
                "password": password,
                "name": name,
            });
            let encrypted = self.cipher.encrypt_record(
                plain.as_object().cloned().unwrap_or_default(),
                fields::AUTHORITY_ENCRYPTED,
            );
            let field = |name: &str| -> String {
                encrypted
                    .get(name)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            let record = NewAuthority {
                username: field("username"),
                password: field("password"),
                name: field("name"),
                role: (*role).to_string(),
            };
            self.store
                .insert_authority(record, time::now_iso())
                .await?;
            info!(username, "sample authority account created");
        }
        Ok(())
    }

    pub fn sms_status(&self) -> ChannelStatus {
        self.channel.status()
    }

    fn decrypt_profile(&self, record: &TouristRecord) -> Result<TouristProfile, RegistryError> {
        let decrypted = self
            .cipher
            .decrypt_record(to_field_map(record), fields::TOURIST_PROFILE)
            .map_err(RegistryError::CorruptRecord)?;
        Ok(from_field_map(decrypted)?)
    }
}

fn profile_of(plain: &TouristRecord) -> TouristProfile {
    TouristProfile {
        full_name: plain.full_name.clone(),
        nationality: plain.nationality.clone(),
        passport: plain.passport.clone(),
        phone: plain.phone.clone(),
        email: plain.email.clone(),
        emergency_contact_name: plain.emergency_contact_name.clone(),
        emergency_contact_phone: plain.emergency_contact_phone.clone(),
        emergency_contact_email: plain.emergency_contact_email.clone(),
    }
}
