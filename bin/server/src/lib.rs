//! signet web server.
//!
//! Authenticates users against an OpenID Connect provider, records each
//! user's claims the first time they log in, and keeps the claims in a
//! signed session cookie.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
