//! Core of the sign-in page designer.
//!
//! Holds the shared app state, the login configuration store that keeps a
//! single enabled configuration per type, and the authentication plumbing
//! used by the feature crates.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod extract;
pub mod memory_adapter;
pub mod middleware;
pub mod prelude;
pub mod route_auth;
pub mod store;

pub use app::{App, AppBuilderOpts, AppState};
pub use extract::{Auth, OptionalAuth, OptionalRequestId, RequestId};
pub use store::LoginConfigStore;

// vim: ts=4
