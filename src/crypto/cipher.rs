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

//! Field-level encryption codec.
//!
//! Encrypts individual string values with AES-256-GCM under the process-wide
//! key. A fresh random nonce is drawn per call, so two encryptions of the
//! same plaintext produce different ciphertexts; any ciphertext this codec
//! produced decrypts back to the exact original plaintext. The text form is
//! `base64(nonce || ciphertext || tag)`.

use crate::constants::cipher::NONCE_LENGTH;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecryptionError {
    #[error("ciphertext is not valid base64")]
    Encoding(#[from] base64::DecodeError),
    #[error("ciphertext too short to carry a nonce")]
    TruncatedNonce,
    #[error("authenticated decryption failed")]
    Aead,
    #[error("decrypted bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Reversible codec for individual encrypted fields and whole records.
#[derive(Clone)]
pub struct FieldCipher {
    aead: Aes256Gcm,
}

impl FieldCipher {
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            aead: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Encrypt a single field value. Supports the empty string.
    pub fn encrypt_field(&self, plaintext: &str) -> String {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .aead
            .encrypt(&nonce, plaintext.as_bytes())
            .expect("AES-GCM encryption of an in-memory buffer cannot fail");

        let mut blob = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        blob.extend_from_slice(nonce.as_slice());
        blob.extend_from_slice(&ciphertext);
        BASE64.encode(blob)
    }

    /// Decrypt a single field value previously produced by [`encrypt_field`].
    ///
    /// Bulk scanners must treat a failure here as "this record does not
    /// match" rather than aborting the whole scan.
    ///
    /// [`encrypt_field`]: FieldCipher::encrypt_field
    pub fn decrypt_field(&self, ciphertext: &str) -> Result<String, DecryptionError> {
        let blob = BASE64.decode(ciphertext)?;
        if blob.len() < NONCE_LENGTH {
            return Err(DecryptionError::TruncatedNonce);
        }

        let (nonce, payload) = blob.split_at(NONCE_LENGTH);
        let plaintext = self
            .aead
            .decrypt(Nonce::from_slice(nonce), payload)
            .map_err(|_| DecryptionError::Aead)?;
        Ok(String::from_utf8(plaintext)?)
    }

    /// Encrypt exactly the named string fields of a record, passing every
    /// other entry through unchanged. Named fields absent from the record
    /// (or holding non-string values) are left untouched.
    pub fn encrypt_record(
        &self,
        mut record: Map<String, Value>,
        fields: &[&str],
    ) -> Map<String, Value> {
        for name in fields {
            if let Some(Value::String(plaintext)) = record.get(*name) {
                let ciphertext = self.encrypt_field(plaintext);
                record.insert((*name).to_string(), Value::String(ciphertext));
            }
        }
        record
    }

    /// Inverse of [`encrypt_record`], with the same partial-application
    /// semantics. Fails on the first named field that does not decrypt; the
    /// caller decides whether that excludes the record or surfaces an error.
    ///
    /// [`encrypt_record`]: FieldCipher::encrypt_record
    pub fn decrypt_record(
        &self,
        mut record: Map<String, Value>,
        fields: &[&str],
    ) -> Result<Map<String, Value>, DecryptionError> {
        for name in fields {
            if let Some(Value::String(ciphertext)) = record.get(*name) {
                let plaintext = self.decrypt_field(ciphertext)?;
                record.insert((*name).to_string(), Value::String(plaintext));
            }
        }
        Ok(record)
    }
}
