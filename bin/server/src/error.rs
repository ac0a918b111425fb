//! Domain error types for server startup.
//!
//! Request-time failures are rendered by the handlers themselves; see
//! [`CallbackError`](crate::auth::CallbackError).

use std::fmt;

/// Errors that stop the server from starting or serving.
#[derive(Debug)]
pub enum StartupError {
    /// Configuration is missing or invalid.
    Configuration { details: String },
    /// The identity provider could not be discovered.
    Discovery { details: String },
    /// The user store could not be set up.
    Store { details: String },
    /// The listen address could not be bound.
    Bind { addr: String, details: String },
    /// The server stopped with an I/O error.
    Serve { details: String },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { details } => {
                write!(f, "invalid configuration: {}", details)
            }
            Self::Discovery { details } => {
                write!(f, "identity provider discovery failed: {}", details)
            }
            Self::Store { details } => {
                write!(f, "user store setup failed: {}", details)
            }
            Self::Bind { addr, details } => {
                write!(f, "failed to bind to {}: {}", addr, details)
            }
            Self::Serve { details } => write!(f, "server error: {}", details),
        }
    }
}

impl std::error::Error for StartupError {}
