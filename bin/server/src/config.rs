//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Nested keys use
//! a double underscore, so `AUTH0__CLIENT_ID` sets `auth0.client_id`.
//! A `.env` file in the working directory is loaded first, if present.
//!
//! See [`OidcConfig`](signet_identity::OidcConfig) for identity provider
//! configuration.

use serde::Deserialize;
use signet_identity::OidcConfig;
use signet_user_store::StoreBackend;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Identity provider configuration.
    #[serde(rename = "auth0")]
    pub oidc: OidcConfig,

    /// DynamoDB table configuration.
    #[serde(default)]
    pub aws: AwsConfig,

    /// User store selection.
    #[serde(default)]
    pub store: StoreConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 8000))
}

/// DynamoDB settings. Credentials always come from the AWS default chain.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    /// Region override. Falls back to `AWS_REGION` / the active profile.
    #[serde(default)]
    pub region: Option<String>,

    /// Table holding user records, partitioned on `sub`.
    #[serde(default = "default_table")]
    pub table: String,

    /// Endpoint override, e.g. `http://localhost:8001` for DynamoDB Local.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_table() -> String {
    "users".to_string()
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: None,
            table: default_table(),
            endpoint_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

/// Session-related configuration.
#[derive(Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign cookies, at least 64 bytes.
    /// When unset a random key is generated and sessions do not survive a restart.
    #[serde(default)]
    pub secret: Option<String>,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to false since the server listens on plain HTTP by default.
    #[serde(default)]
    pub secure_cookies: bool,

    /// Session cookie lifetime in minutes.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,
}

fn default_session_duration_minutes() -> i64 {
    14 * 24 * 60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            secure_cookies: false,
            duration_minutes: default_session_duration_minutes(),
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .field("secure_cookies", &self.secure_cookies)
            .field("duration_minutes", &self.duration_minutes)
            .finish()
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // A missing .env file is the normal case outside local development.
        let _ = dotenvy::dotenv();
        Self::from_environment(config::Environment::default())
    }

    /// Loads configuration from the given environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__"))
            .build()?
            .try_deserialize()
    }
}
