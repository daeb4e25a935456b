//! Sign-in page designer server.
//!
//! Operators manage login configurations through a JSON API and preview them
//! as rendered pages. At most one configuration per type is active, and the
//! active home configuration is served as the public sign-in page.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub use loginpage_core::memory_adapter;
pub use loginpage_core::route_auth;
pub use loginpage_types::config_adapter;
pub use loginpage_types::error;
pub use loginpage_types::login_config;
pub use loginpage_types::types;

pub mod app;
pub mod prelude;
pub mod routes;
pub mod webserver;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
