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

//! Decrypt-and-compare credential matching.
//!
//! Stored credentials are ciphertext with no plaintext or hashed index, so
//! every authentication attempt scans the full store, decrypting candidate
//! fields record by record. O(n) decrypts per attempt is the accepted cost
//! of that design. A record that fails to decrypt is skipped, never fatal;
//! only failing to read the store at all escalates.

use tracing::debug;

use crate::crypto::cipher::FieldCipher;
use crate::registry::models::{AuthorityRecord, TouristRecord};
use crate::registry::store::{RecordStore, StoreError};

pub struct CredentialMatcher<'a> {
    cipher: &'a FieldCipher,
}

impl<'a> CredentialMatcher<'a> {
    pub fn new(cipher: &'a FieldCipher) -> Self {
        Self { cipher }
    }

    /// Find the first tourist whose decrypted passport and password both
    /// equal the submitted plaintext. Returns `None` when nothing matches;
    /// the caller collapses that into the generic invalid-credentials reply.
    pub async fn find_tourist(
        &self,
        store: &dyn RecordStore,
        passport: &str,
        password: &str,
    ) -> Result<Option<TouristRecord>, StoreError> {
        let records = store.list_tourists().await?;
        Ok(records.into_iter().find(|record| {
            self.field_matches(record.id.as_str(), &record.passport, passport)
                && self.field_matches(record.id.as_str(), &record.password, password)
        }))
    }

    /// Find the first authority whose decrypted username and password both
    /// equal the submitted plaintext. First match wins; username uniqueness
    /// is not enforced here.
    pub async fn find_authority(
        &self,
        store: &dyn RecordStore,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthorityRecord>, StoreError> {
        let records = store.list_authorities().await?;
        Ok(records.into_iter().find(|record| {
            let label = record.id.to_string();
            self.field_matches(&label, &record.username, username)
                && self.field_matches(&label, &record.password, password)
        }))
    }

    /// Pre-insert uniqueness gate: scan decrypted passports only.
    pub async fn passport_registered(
        &self,
        store: &dyn RecordStore,
        passport: &str,
    ) -> Result<bool, StoreError> {
        let records = store.list_tourists().await?;
        Ok(records
            .iter()
            .any(|record| self.field_matches(record.id.as_str(), &record.passport, passport)))
    }

    /// Decrypt one stored field and compare against the submitted plaintext.
    /// Decryption failure counts as "no match" for this record.
    fn field_matches(&self, record_label: &str, ciphertext: &str, expected: &str) -> bool {
        match self.cipher.decrypt_field(ciphertext) {
            Ok(plaintext) => plaintext == expected,
            Err(e) => {
                debug!(record = record_label, error = %e, "skipping undecryptable record field");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::models::{mint_tx_hash, NewAuthority, TouristId};
    use crate::registry::store::MemoryStore;

    fn cipher() -> FieldCipher {
        FieldCipher::new(&[0x11; 32])
    }

    fn encrypted_tourist(cipher: &FieldCipher, passport: &str, password: &str) -> TouristRecord {
        TouristRecord {
            id: TouristId::generate(),
            full_name: cipher.encrypt_field("Name"),
            nationality: cipher.encrypt_field("Nowhere"),
            passport: cipher.encrypt_field(passport),
            phone: cipher.encrypt_field("+15550001111"),
            email: cipher.encrypt_field(""),
            emergency_contact_name: cipher.encrypt_field("EC"),
            emergency_contact_phone: cipher.encrypt_field("+15550002222"),
            emergency_contact_email: cipher.encrypt_field("ec@example.com"),
            password: cipher.encrypt_field(password),
            tx_hash: mint_tx_hash(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn finds_the_matching_record_among_many() {
        let cipher = cipher();
        let store = MemoryStore::new();
        for i in 0..10 {
            let record = encrypted_tourist(&cipher, &format!("P{i}"), &format!("pw{i}"));
            store.insert_tourist(record).await.unwrap();
        }

        let matcher = CredentialMatcher::new(&cipher);
        let found = matcher
            .find_tourist(&store, "P7", "pw7")
            .await
            .unwrap()
            .expect("record should match");
        assert_eq!(cipher.decrypt_field(&found.passport).unwrap(), "P7");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_passport_both_miss() {
        let cipher = cipher();
        let store = MemoryStore::new();
        store
            .insert_tourist(encrypted_tourist(&cipher, "P1", "pw1"))
            .await
            .unwrap();

        let matcher = CredentialMatcher::new(&cipher);
        assert!(matcher.find_tourist(&store, "P1", "bad").await.unwrap().is_none());
        assert!(matcher.find_tourist(&store, "P9", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn undecryptable_records_are_skipped_not_fatal() {
        let cipher = cipher();
        let store = MemoryStore::new();

        // A record written under a different key decrypts to garbage here.
        let foreign = FieldCipher::new(&[0x22; 32]);
        store
            .insert_tourist(encrypted_tourist(&foreign, "P1", "pw1"))
            .await
            .unwrap();
        store
            .insert_tourist(encrypted_tourist(&cipher, "P1", "pw1"))
            .await
            .unwrap();

        let matcher = CredentialMatcher::new(&cipher);
        let found = matcher.find_tourist(&store, "P1", "pw1").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn duplicate_passports_are_detected_across_distinct_ciphertexts() {
        let cipher = cipher();
        let store = MemoryStore::new();
        let record = encrypted_tourist(&cipher, "P123", "pw1");
        let stored_ciphertext = record.passport.clone();
        store.insert_tourist(record).await.unwrap();

        // Encrypting the same passport again yields different ciphertext,
        // which is exactly why the gate must decrypt to compare.
        assert_ne!(cipher.encrypt_field("P123"), stored_ciphertext);

        let matcher = CredentialMatcher::new(&cipher);
        assert!(matcher.passport_registered(&store, "P123").await.unwrap());
        assert!(!matcher.passport_registered(&store, "P999").await.unwrap());
    }

    #[tokio::test]
    async fn authority_first_match_wins() {
        let cipher = cipher();
        let store = MemoryStore::new();
        for name in ["First Officer", "Second Officer"] {
            let record = NewAuthority {
                username: cipher.encrypt_field("police"),
                password: cipher.encrypt_field("police123"),
                name: cipher.encrypt_field(name),
                role: "police".into(),
            };
            store.insert_authority(record, "t".into()).await.unwrap();
        }

        let matcher = CredentialMatcher::new(&cipher);
        let found = matcher
            .find_authority(&store, "police", "police123")
            .await
            .unwrap()
            .expect("authority should match");
        assert_eq!(found.id, 1);
    }
}
