//! Shared types, adapter traits, and error types for the sign-in page designer.
//!
//! Everything the adapters and the feature crates have to agree on lives here:
//! the persisted `LoginConfig` record and its options document, the storage
//! adapter trait, and the workspace-wide error type.

#![forbid(unsafe_code)]

pub mod auth;
pub mod config_adapter;
pub mod error;
pub mod login_config;
pub mod prelude;
pub mod types;

// vim: ts=4
