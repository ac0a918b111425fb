//! Core domain types and utilities for signet.
//!
//! This crate provides the foundational types and error handling shared by
//! the identity, storage, and server crates.

pub mod error;
pub mod subject;

pub use error::Result;
pub use subject::{ParseSubjectError, Subject};
