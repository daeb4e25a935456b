//! Login configuration API and the public sign-in page.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;
pub mod page;
mod prelude;

pub use page::SignInPage;

// vim: ts=4
