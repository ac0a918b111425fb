//! User record persistence for signet.
//!
//! A user record is the claim set returned by the identity provider the
//! first time a subject logs in. Records are keyed by `sub`, written once,
//! and never updated or deleted.
//!
//! This crate provides:
//! - The `UserStore` trait and its DynamoDB and in-memory implementations
//! - `save_if_absent`, the get-then-put used by the login callback
//! - Conversion between JSON claims and DynamoDB attribute values
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use signet_identity::UserClaims;
//! use signet_user_store::{MemoryUserStore, SaveOutcome, save_if_absent};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = MemoryUserStore::new();
//! let claims = UserClaims::try_from(json!({"sub": "auth0|1", "name": "Alice"}))
//!     .expect("claims with a subject");
//!
//! assert_eq!(save_if_absent(&store, &claims).await, SaveOutcome::Created);
//! assert_eq!(save_if_absent(&store, &claims).await, SaveOutcome::AlreadyExists);
//! # }
//! ```

pub mod attribute;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod save;
pub mod store;

// Re-export main types at crate root
pub use dynamo::DynamoUserStore;
pub use error::StoreError;
pub use memory::MemoryUserStore;
pub use save::{SaveOutcome, save_if_absent};
pub use store::{PutOutcome, StoreBackend, UserStore};
