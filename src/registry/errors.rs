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

//! Registry error taxonomy.
//!
//! Login failures collapse to one generic message per account family so a
//! caller cannot tell which half of a credential pair was wrong. Duplicate
//! registration stays distinguishable. Store and record-decoding failures
//! surface as generic service errors with no internal detail leaked.

use crate::crypto::cipher::DecryptionError;
use crate::notify::dispatcher::NotifyError;
use crate::registry::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Wrong passport, wrong password, or no such tourist: indistinguishable.
    #[error("Invalid passport or password.")]
    InvalidTouristCredentials,

    /// Wrong username, wrong password, or no such authority: indistinguishable.
    #[error("Invalid username or password.")]
    InvalidAuthorityCredentials,

    #[error("Tourist already registered. Please login instead.")]
    DuplicateRegistration,

    #[error("Tourist not found.")]
    TouristNotFound,

    /// The store could not be read or written at all.
    #[error("Registry service unavailable.")]
    StoreUnavailable(#[source] StoreError),

    /// A fetched record failed to decrypt outside a scan context.
    #[error("Stored record could not be decoded.")]
    CorruptRecord(#[source] DecryptionError),

    /// A record failed to round-trip the codec boundary; internal, generic.
    #[error("Registry service unavailable.")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        RegistryError::StoreUnavailable(err)
    }
}
