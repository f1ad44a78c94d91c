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

//! Credential store boundary.
//!
//! The registry reads records through the `RecordStore` trait and never
//! assumes an index beyond primary-key lookup. Inserts are append-only;
//! scans are full-table reads. `MemoryStore` is the in-process
//! implementation used by the demo binary and tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::registry::models::{
    AlertRecord, AuthorityRecord, NewAlert, NewAuthority, TouristRecord,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),
    #[error("store write failed: {0}")]
    Write(String),
}

/// Persistence boundary for tourist, authority, and alert records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_tourists(&self) -> Result<Vec<TouristRecord>, StoreError>;
    async fn insert_tourist(&self, record: TouristRecord) -> Result<(), StoreError>;
    async fn get_tourist(&self, id: &str) -> Result<Option<TouristRecord>, StoreError>;

    async fn list_authorities(&self) -> Result<Vec<AuthorityRecord>, StoreError>;
    /// Insert an authority row; the store assigns and returns the row id.
    async fn insert_authority(
        &self,
        record: NewAuthority,
        created_at: String,
    ) -> Result<AuthorityRecord, StoreError>;

    /// Insert an alert row; the store assigns the row id.
    async fn insert_alert(
        &self,
        alert: NewAlert,
        created_at: String,
    ) -> Result<AlertRecord, StoreError>;
    /// Most recent alerts first, capped at `limit`.
    async fn recent_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, StoreError>;
    async fn alerts_for_tourist(&self, tourist_id: &str) -> Result<Vec<AlertRecord>, StoreError>;
}

/// In-process store backed by append-only vectors.
#[derive(Default)]
pub struct MemoryStore {
    tourists: RwLock<Vec<TouristRecord>>,
    authorities: RwLock<Vec<AuthorityRecord>>,
    alerts: RwLock<Vec<AlertRecord>>,
    next_authority_id: AtomicI64,
    next_alert_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_tourists(&self) -> Result<Vec<TouristRecord>, StoreError> {
        Ok(self.tourists.read().await.clone())
    }

    async fn insert_tourist(&self, record: TouristRecord) -> Result<(), StoreError> {
        self.tourists.write().await.push(record);
        Ok(())
    }

    async fn get_tourist(&self, id: &str) -> Result<Option<TouristRecord>, StoreError> {
        Ok(self
            .tourists
            .read()
            .await
            .iter()
            .find(|t| t.id.as_str() == id)
            .cloned())
    }

    async fn list_authorities(&self) -> Result<Vec<AuthorityRecord>, StoreError> {
        Ok(self.authorities.read().await.clone())
    }

    async fn insert_authority(
        &self,
        record: NewAuthority,
        created_at: String,
    ) -> Result<AuthorityRecord, StoreError> {
        let id = self.next_authority_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = AuthorityRecord {
            id,
            username: record.username,
            password: record.password,
            name: record.name,
            role: record.role,
            created_at,
        };
        self.authorities.write().await.push(row.clone());
        Ok(row)
    }

    async fn insert_alert(
        &self,
        alert: NewAlert,
        created_at: String,
    ) -> Result<AlertRecord, StoreError> {
        let id = self.next_alert_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = AlertRecord {
            id,
            alert_id: alert.alert_id,
            kind: alert.kind,
            message: alert.message,
            timestamp: alert.timestamp,
            tourist_id: alert.tourist_id,
            severity: alert.severity,
            created_at,
        };
        self.alerts.write().await.push(row.clone());
        Ok(row)
    }

    async fn recent_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, StoreError> {
        // Rows are appended in creation order, so newest-first is a reverse walk.
        Ok(self
            .alerts
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn alerts_for_tourist(&self, tourist_id: &str) -> Result<Vec<AlertRecord>, StoreError> {
        Ok(self
            .alerts
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| a.tourist_id == tourist_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::models::{mint_tx_hash, TouristId};

    fn tourist(passport: &str) -> TouristRecord {
        TouristRecord {
            id: TouristId::generate(),
            full_name: "n".into(),
            nationality: "x".into(),
            passport: passport.into(),
            phone: "p".into(),
            email: String::new(),
            emergency_contact_name: "e".into(),
            emergency_contact_phone: "e".into(),
            emergency_contact_email: "e".into(),
            password: "pw".into(),
            tx_hash: mint_tx_hash(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn tourist_rows_are_returned_in_insertion_order() {
        let store = MemoryStore::new();
        store.insert_tourist(tourist("A")).await.unwrap();
        store.insert_tourist(tourist("B")).await.unwrap();

        let rows = store.list_tourists().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].passport, "A");
        assert_eq!(rows[1].passport, "B");
    }

    #[tokio::test]
    async fn tourist_lookup_by_id() {
        let store = MemoryStore::new();
        let record = tourist("A");
        let id = record.id.clone();
        store.insert_tourist(record).await.unwrap();

        assert!(store.get_tourist(id.as_str()).await.unwrap().is_some());
        assert!(store.get_tourist("TID-FFFFFFFF").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn authority_rows_get_increasing_ids() {
        let store = MemoryStore::new();
        let a = NewAuthority {
            username: "u1".into(),
            password: "p".into(),
            name: "n".into(),
            role: "admin".into(),
        };
        let b = NewAuthority {
            username: "u2".into(),
            password: "p".into(),
            name: "n".into(),
            role: "police".into(),
        };
        let first = store.insert_authority(a, "t".into()).await.unwrap();
        let second = store.insert_authority(b, "t".into()).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn recent_alerts_are_newest_first_and_capped() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let alert = NewAlert {
                alert_id: format!("a{i}"),
                kind: "sos".into(),
                message: "m".into(),
                timestamp: "t".into(),
                tourist_id: "TID-00000001".into(),
                severity: "high".into(),
            };
            store.insert_alert(alert, format!("2026-01-0{}", i + 1)).await.unwrap();
        }

        let recent = store.recent_alerts(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].alert_id, "a4");
        assert_eq!(recent[2].alert_id, "a2");
    }
}
