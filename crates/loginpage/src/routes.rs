use axum::{
	Extension, Router, middleware,
	routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::prelude::*;
use loginpage_config::{SignInPage, handler};
use loginpage_core::middleware::request_id;
use loginpage_core::route_auth::{optional_auth, require_auth};

pub fn init(app: App, page: Arc<SignInPage>) -> Router {
	let protected_router = Router::new()
		.route(
			"/api/login-config",
			get(handler::list_login_configs).post(handler::post_login_config),
		)
		.route("/api/login-config/draft", get(handler::get_login_config_draft))
		.route("/api/login-config/render", post(handler::render_preview))
		.route(
			"/api/login-config/{id}",
			get(handler::get_login_config)
				.patch(handler::patch_login_config)
				.delete(handler::delete_login_config),
		)
		.route_layer(middleware::from_fn_with_state(app.clone(), require_auth));

	let public_router = Router::new()
		.route("/api/login-config/active", get(handler::get_active_login_config))
		.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth));

	let page_router = Router::new().route("/signin", get(handler::get_signin_page));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.merge(page_router)
		.layer(Extension(page))
		.layer(middleware::from_fn(request_id))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
