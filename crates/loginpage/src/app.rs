//! App builder - constructs and runs the sign-in page designer

use axum::Router;
use std::{sync::Arc, time::Duration};

use crate::prelude::*;
use crate::{routes, webserver};
use loginpage_config::SignInPage;
pub use loginpage_core::app::{App, AppBuilderOpts, AppState, VERSION};
use loginpage_core::store::LoginConfigStore;
use loginpage_types::config_adapter::LoginConfigAdapter;

pub const DEFAULT_PREVIEW_DEBOUNCE: Duration = Duration::from_millis(400);

pub struct AppBuilder {
	opts: AppBuilderOpts,
	login_config_adapter: Option<Arc<dyn LoginConfigAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// A subscriber may already be installed, e.g. by another test
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				jwt_secret: "".into(),
				system_title: "Sign in".into(),
				preview_debounce: DEFAULT_PREVIEW_DEBOUNCE,
			},
			login_config_adapter: None,
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.jwt_secret = jwt_secret.into();
		self
	}
	pub fn system_title(&mut self, system_title: impl Into<Box<str>>) -> &mut Self {
		self.opts.system_title = system_title.into();
		self
	}
	pub fn preview_debounce(&mut self, preview_debounce: Duration) -> &mut Self {
		self.opts.preview_debounce = preview_debounce;
		self
	}

	// Adapters
	pub fn login_config_adapter(&mut self, adapter: Arc<dyn LoginConfigAdapter>) -> &mut Self {
		self.login_config_adapter = Some(adapter);
		self
	}

	/// Creates the app state and its router without starting a server
	pub fn build(self) -> ClResult<(App, Router)> {
		if self.opts.jwt_secret.is_empty() {
			error!("FATAL: No JWT secret configured");
			return Err(Error::ConfigError("No JWT secret configured".into()));
		}
		let Some(adapter) = self.login_config_adapter else {
			error!("FATAL: No login config adapter configured");
			return Err(Error::ConfigError("No login config adapter configured".into()));
		};

		let page = Arc::new(SignInPage::new()?);
		let app: App = Arc::new(AppState { store: LoginConfigStore::new(adapter), opts: self.opts });
		let router = routes::init(app.clone(), page);

		Ok((app, router))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("Sign-in page designer V{}", VERSION);

		let (app, router) = self.build()?;
		info!(
			"System title: {:?}, preview debounce: {}ms",
			app.opts.system_title,
			app.opts.preview_debounce.as_millis()
		);

		webserver::serve(&app.opts.listen, router).await
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
