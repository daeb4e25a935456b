//! Sign-in page preview.
//!
//! Turns a login options document into what the sign-in screen shows, and
//! keeps an editor's preview in step with its draft.

#![forbid(unsafe_code)]

pub mod color;
pub mod content;
pub mod controller;
pub mod defaults;
pub mod layout;
pub mod markdown;
pub mod session;

pub use controller::{Draft, PreviewFlags, PreviewMode, PreviewStateController};
pub use layout::SignInView;
pub use session::PreviewSession;

// vim: ts=4
