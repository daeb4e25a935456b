//! App state type

use std::sync::Arc;
use std::time::Duration;

use crate::store::LoginConfigStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub store: LoginConfigStore,
	pub opts: AppBuilderOpts,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// HS256 secret of access tokens
	pub jwt_secret: Box<str>,
	/// Host system name shown on the sign-in page
	pub system_title: Box<str>,
	/// Debounce window of live previews
	pub preview_debounce: Duration,
}

// vim: ts=4
