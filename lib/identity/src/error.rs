//! Error types for the identity crate.
//!
//! `AuthenticationError` covers every way the login flow can fail, from
//! discovery at startup through the provider callback.

use std::fmt;

/// Errors from authentication operations.
///
/// These errors represent failures in verifying user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// Client configuration is unusable (bad URLs, HTTP client setup).
    Configuration { reason: String },
    /// Provider metadata could not be discovered.
    Discovery { reason: String },
    /// OIDC provider error, e.g. the userinfo endpoint failed.
    ProviderError { provider: String, reason: String },
    /// Exchanging the authorization code for tokens failed.
    TokenExchange { reason: String },
    /// OIDC token validation failed.
    InvalidToken { reason: String },
    /// Missing required claim.
    MissingClaim { claim: String },
    /// A claim is present but has the wrong shape.
    InvalidClaim { claim: String, reason: String },
    /// The `state` returned by the provider does not match the one issued.
    StateMismatch,
    /// No login attempt is in progress for this client.
    MissingAuthState,
    /// A required callback parameter was not supplied.
    MissingParameter { name: String },
    /// The provider redirected back with an error instead of a code.
    Callback {
        error: String,
        description: Option<String>,
    },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => {
                write!(f, "OIDC configuration error: {reason}")
            }
            Self::Discovery { reason } => {
                write!(f, "OIDC discovery error: {reason}")
            }
            Self::ProviderError { provider, reason } => {
                write!(f, "OIDC provider '{provider}' error: {reason}")
            }
            Self::TokenExchange { reason } => {
                write!(f, "token exchange failed: {reason}")
            }
            Self::InvalidToken { reason } => {
                write!(f, "invalid token: {reason}")
            }
            Self::MissingClaim { claim } => {
                write!(f, "missing required claim: {claim}")
            }
            Self::InvalidClaim { claim, reason } => {
                write!(f, "invalid claim '{claim}': {reason}")
            }
            Self::StateMismatch => {
                write!(f, "state parameter does not match the login attempt")
            }
            Self::MissingAuthState => {
                write!(f, "no login attempt in progress")
            }
            Self::MissingParameter { name } => {
                write!(f, "missing callback parameter: {name}")
            }
            Self::Callback {
                error,
                description: Some(description),
            } => {
                write!(f, "{error}: {description}")
            }
            Self::Callback {
                error,
                description: None,
            } => {
                write!(f, "{error}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}
