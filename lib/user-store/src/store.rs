//! The storage seam for user records.

use async_trait::async_trait;
use serde::Deserialize;
use signet_core::{Result, Subject};
use signet_identity::UserClaims;
use std::fmt;

use crate::error::StoreError;

/// Result of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was written.
    Created,
    /// A record for the subject already existed and was left untouched.
    AlreadyExists,
}

/// A key-value table of user records keyed by subject.
///
/// `put` never overwrites: if a record for the subject exists, the write
/// is skipped and `PutOutcome::AlreadyExists` is returned.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches the record for a subject, if one exists.
    async fn get(&self, subject: &Subject) -> Result<Option<UserClaims>, StoreError>;

    /// Writes a record for the claims' subject unless one already exists.
    async fn put(&self, claims: &UserClaims) -> Result<PutOutcome, StoreError>;
}

/// Which `UserStore` implementation the server runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Amazon DynamoDB (or DynamoDB Local).
    #[default]
    DynamoDb,
    /// Process-local map, lost on restart.
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DynamoDb => f.write_str("dynamodb"),
            Self::Memory => f.write_str("memory"),
        }
    }
}
