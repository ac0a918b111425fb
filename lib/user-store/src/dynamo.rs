//! DynamoDB-backed user store.
//!
//! The table has a single string partition key, `sub`. Reads are strongly
//! consistent so a record written by a concurrent login is visible to the
//! next lookup, and writes carry `attribute_not_exists(sub)` so two first
//! logins for the same subject cannot overwrite each other.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use signet_core::{Result, Subject};
use signet_identity::UserClaims;
use signet_identity::claims::SUBJECT_CLAIM;
use tracing::{debug, instrument};

use crate::attribute::{claims_to_item, item_to_claims};
use crate::error::StoreError;
use crate::store::{PutOutcome, UserStore};

/// Default table name.
pub const DEFAULT_TABLE: &str = "users";

/// A `UserStore` backed by a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoUserStore {
    client: Client,
    table: String,
}

impl DynamoUserStore {
    /// Creates a store over an existing client.
    #[must_use]
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Creates a store from the AWS default credential and region chain.
    ///
    /// # Arguments
    ///
    /// * `table` - The table holding user records
    /// * `region` - Overrides the region from the environment/profile
    /// * `endpoint_url` - Overrides the service endpoint (e.g. DynamoDB Local)
    pub async fn connect(
        table: impl Into<String>,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> Result<Self, StoreError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint_url) = endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        if sdk_config.region().is_none() {
            return Err(StoreError::Connection {
                details: "no AWS region configured".to_string(),
            }
            .into());
        }

        Ok(Self::new(Client::new(&sdk_config), table))
    }

    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl UserStore for DynamoUserStore {
    #[instrument(skip(self), fields(table = %self.table, sub = %subject))]
    async fn get(&self, subject: &Subject) -> Result<Option<UserClaims>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(SUBJECT_CLAIM, AttributeValue::S(subject.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StoreError::Request {
                operation: "GetItem",
                details: DisplayErrorContext(&e).to_string(),
            })?;

        match output.item {
            Some(item) => {
                debug!("user record found");
                Ok(Some(item_to_claims(&item)?))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, claims), fields(table = %self.table, sub = %claims.subject()))]
    async fn put(&self, claims: &UserClaims) -> Result<PutOutcome, StoreError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(claims_to_item(claims)))
            .condition_expression("attribute_not_exists(#sub)")
            .expression_attribute_names("#sub", SUBJECT_CLAIM)
            .send()
            .await;

        match result {
            Ok(_) => Ok(PutOutcome::Created),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                debug!("user record already exists, write skipped");
                Ok(PutOutcome::AlreadyExists)
            }
            Err(e) => Err(StoreError::Request {
                operation: "PutItem",
                details: DisplayErrorContext(&e).to_string(),
            }
            .into()),
        }
    }
}
