//! Error types for the user-store crate.
//!
//! Store operations return `Report<StoreError>` so callers can layer
//! their own context with rootcause.

use std::fmt;

/// Errors from user store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or configured.
    Connection { details: String },
    /// A request to the backing store failed.
    Request {
        /// The store operation, e.g. "GetItem".
        operation: &'static str,
        /// Error details.
        details: String,
    },
    /// A stored record could not be read back as user claims.
    InvalidRecord { details: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection { details } => {
                write!(f, "failed to connect to user store: {details}")
            }
            Self::Request { operation, details } => {
                write!(f, "user store {operation} failed: {details}")
            }
            Self::InvalidRecord { details } => {
                write!(f, "invalid user record: {details}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
