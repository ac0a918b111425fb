//! In-process user store.

use async_trait::async_trait;
use signet_core::{Result, Subject};
use signet_identity::UserClaims;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{PutOutcome, UserStore};

/// A `UserStore` backed by a map in process memory.
///
/// Used for local development without AWS credentials and in tests.
/// Records are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<HashMap<Subject, UserClaims>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, subject: &Subject) -> Result<Option<UserClaims>, StoreError> {
        Ok(self.records.read().await.get(subject).cloned())
    }

    async fn put(&self, claims: &UserClaims) -> Result<PutOutcome, StoreError> {
        let mut records = self.records.write().await;
        match records.entry(claims.subject().clone()) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(entry) => {
                entry.insert(claims.clone());
                Ok(PutOutcome::Created)
            }
        }
    }
}
