//! Authentication module for the signet server.
//!
//! This module provides:
//! - The `IdentityProvider` seam and its OIDC implementation
//! - Signed cookie sessions holding the user's claims
//! - The `/login`, `/callback` and `/logout` handlers
//!
//! Login state and the session live entirely in signed cookies, so the
//! server keeps no per-user state of its own. The only persistent write is
//! the first-seen user record in the user store.

pub mod oidc;
pub mod provider;
pub mod routes;
pub mod session;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use signet_user_store::UserStore;
use std::sync::Arc;

use crate::config::SessionConfig;

pub use oidc::OidcClient;
pub use provider::{IdentityProvider, TokenSet};
pub use routes::{CallbackError, callback, login, logout};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Identity provider the login flow delegates to.
    pub provider: Arc<dyn IdentityProvider>,
    /// Store of first-seen user records.
    pub users: Arc<dyn UserStore>,
    /// Session configuration.
    pub session_config: SessionConfig,
    key: Key,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserStore>,
        key: Key,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            provider,
            users,
            session_config,
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
