//! Router assembly and application state construction.

use axum::{Json, Router, routing::get};
use rootcause::prelude::Report;
use serde_json::{Value, json};
use signet_user_store::{DynamoUserStore, MemoryUserStore, StoreBackend, UserStore};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::{self, AppState, OidcClient, session};
use crate::config::ServerConfig;
use crate::error::StartupError;

/// Message served at the root path.
pub const GREETING: &str = "Welcome! Go to /login to authenticate.";

/// Builds the HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", get(auth::logout))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn home() -> Json<Value> {
    Json(json!({ "message": GREETING }))
}

/// Builds the application state: signing key, provider discovery and the
/// configured user store.
pub async fn build_state(config: ServerConfig) -> Result<AppState, Report<StartupError>> {
    let key = session::signing_key(&config.session).map_err(|e| StartupError::Configuration {
        details: e.to_string(),
    })?;
    session::session_duration(&config.session).map_err(|e| StartupError::Configuration {
        details: e.to_string(),
    })?;

    info!(domain = config.oidc.domain(), "discovering OIDC provider");
    let provider = OidcClient::discover(config.oidc)
        .await
        .map_err(|e| StartupError::Discovery {
            details: e.to_string(),
        })?;

    let users: Arc<dyn UserStore> = match config.store.backend {
        StoreBackend::DynamoDb => {
            let store = DynamoUserStore::connect(
                config.aws.table,
                config.aws.region,
                config.aws.endpoint_url,
            )
            .await
            .map_err(|e| StartupError::Store {
                details: e.to_string(),
            })?;
            info!(table = store.table(), "using DynamoDB user store");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("using in-memory user store, records are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    Ok(AppState::new(Arc::new(provider), users, key, config.session))
}
