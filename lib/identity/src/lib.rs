//! Identity types for signet.
//!
//! This crate provides:
//! - OIDC client configuration (`OidcConfig`) for an Auth0-style tenant
//! - The opaque user claims map returned by the userinfo endpoint (`UserClaims`)
//! - Per-login CSRF/PKCE/nonce state (`LoginState`)
//! - Authentication error types
//!
//! # Example
//!
//! ```
//! use signet_identity::{OidcConfig, UserClaims};
//! use serde_json::json;
//!
//! let config = OidcConfig::new(
//!     "tenant.auth0.com".to_string(),
//!     "client-id".to_string(),
//!     "client-secret".to_string(),
//!     "http://localhost:8000/callback".to_string(),
//! );
//! assert_eq!(config.issuer_url(), "https://tenant.auth0.com/");
//!
//! let claims = UserClaims::try_from(json!({
//!     "sub": "auth0|123456",
//!     "email": "alice@example.com",
//! }))
//! .expect("claims with a subject");
//! assert_eq!(claims.subject().as_str(), "auth0|123456");
//! assert_eq!(claims.email(), Some("alice@example.com"));
//! ```

pub mod claims;
pub mod error;
pub mod login;
pub mod oidc;

// Re-export main types at crate root
pub use claims::UserClaims;
pub use error::AuthenticationError;
pub use login::LoginState;
pub use oidc::{OidcConfig, OidcConfigBuilder};
