//! Login configuration API handlers

use axum::{
	Extension, Json,
	extract::{Path, Query, State},
	http::StatusCode,
	response::Html,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::page::SignInPage;
use crate::prelude::*;
use loginpage_core::extract::{Auth, OptionalAuth, OptionalRequestId};
use loginpage_preview::{Draft, SignInView};
use loginpage_types::config_adapter::{CreateLoginConfig, ListLoginConfigOptions, UpdateLoginConfig};
use loginpage_types::login_config::{HOME_TYPE, LoginConfig, LoginOptions};

/// Unwraps `{"values": {...}}`, anything else is taken as the values themselves
fn request_values(body: Value) -> Value {
	match body {
		Value::Object(mut map) if map.len() == 1 && map.get("values").is_some_and(Value::is_object) => {
			map.remove("values").unwrap_or_default()
		}
		body => body,
	}
}

fn parse_values<T: for<'de> Deserialize<'de>>(body: Value) -> ClResult<T> {
	serde_json::from_value(request_values(body)).map_err(|err| Error::ValidationError(err.to_string()))
}

fn respond<T>(data: T, req_id: Option<String>) -> Json<ApiResponse<T>> {
	let mut response = ApiResponse::new(data);
	if let Some(id) = req_id {
		response = response.with_req_id(id);
	}
	Json(response)
}

pub async fn list_login_configs(
	State(app): State<App>,
	Auth(_auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Query(opts): Query<ListLoginConfigOptions>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<LoginConfig>>>)> {
	let list = app.store.list(&opts).await?;
	Ok((StatusCode::OK, respond(list, req_id)))
}

pub async fn get_login_config(
	State(app): State<App>,
	Auth(_auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Path(id): Path<i64>,
) -> ClResult<(StatusCode, Json<ApiResponse<LoginConfig>>)> {
	let config = app.store.read(ConfigId(id)).await?;
	Ok((StatusCode::OK, respond(config, req_id)))
}

pub async fn post_login_config(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(body): Json<Value>,
) -> ClResult<(StatusCode, Json<ApiResponse<LoginConfig>>)> {
	let values: CreateLoginConfig = parse_values(body)?;
	debug!(by = %auth.id_tag, typ = %values.typ, "create login config");

	let config = app.store.create(&values).await?;
	Ok((StatusCode::CREATED, respond(config, req_id)))
}

pub async fn patch_login_config(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Path(id): Path<i64>,
	Json(body): Json<Value>,
) -> ClResult<(StatusCode, Json<ApiResponse<LoginConfig>>)> {
	let values: UpdateLoginConfig = parse_values(body)?;
	debug!(by = %auth.id_tag, id = id, "update login config");

	let config = app.store.update(ConfigId(id), &values).await?;
	Ok((StatusCode::OK, respond(config, req_id)))
}

pub async fn delete_login_config(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ClResult<StatusCode> {
	debug!(by = %auth.id_tag, id = id, "delete login config");
	app.store.delete(ConfigId(id)).await?;
	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub struct TypeQuery {
	#[serde(default, rename = "type")]
	pub typ: Option<String>,
}

/// Active configuration. Public for the home type, the other types need a
/// signed-in caller.
pub async fn get_active_login_config(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
	Query(query): Query<TypeQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Option<LoginConfig>>>)> {
	let typ = query.typ.as_deref().filter(|t| !t.is_empty());
	let config = app.store.get_active_config(typ, auth.as_ref()).await?;
	Ok((StatusCode::OK, respond(config, req_id)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
	pub draft: Draft,
	pub view: SignInView,
	pub preview_debounce_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct DraftQuery {
	#[serde(default, rename = "type")]
	pub typ: Option<String>,
	#[serde(default)]
	pub id: Option<i64>,
}

/// Starting point of an editor: the stored record when `id` is given,
/// otherwise a new configuration of the given type
pub async fn get_login_config_draft(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
	Query(query): Query<DraftQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<DraftView>>)> {
	let draft = if let Some(id) = query.id {
		Draft::for_edit(&app.store.read(ConfigId(id)).await?)
	} else {
		let typ = query.typ.as_deref().filter(|t| !t.is_empty()).unwrap_or(HOME_TYPE);
		let active = app.store.get_active_config(Some(typ), Some(&auth)).await?;
		Draft::for_new(typ, active.as_ref())
	};
	let view = SignInView::derive(&draft.options, Some(&*app.opts.system_title));
	let preview_debounce_ms = u64::try_from(app.opts.preview_debounce.as_millis()).unwrap_or(u64::MAX);

	Ok((StatusCode::OK, respond(DraftView { draft, view, preview_debounce_ms }, req_id)))
}

/// Renders an options document as the sign-in page would show it
pub async fn render_preview(
	State(app): State<App>,
	Auth(_auth): Auth,
	Extension(page): Extension<Arc<SignInPage>>,
	Json(body): Json<Value>,
) -> ClResult<Html<String>> {
	let options = match request_values(body) {
		Value::Object(mut map) if map.contains_key("options") => {
			LoginOptions::from_value(map.remove("options").unwrap_or_default())
		}
		value => LoginOptions::from_value(value),
	};
	let view = SignInView::derive(&options, Some(&*app.opts.system_title));
	Ok(Html(page.render(&view)?))
}

/// Public sign-in page built from the active home configuration
pub async fn get_signin_page(
	State(app): State<App>,
	Extension(page): Extension<Arc<SignInPage>>,
) -> ClResult<Html<String>> {
	let options = app
		.store
		.get_active_config(Some(HOME_TYPE), None)
		.await?
		.map(|config| config.options)
		.unwrap_or_default();
	let view = SignInView::derive(&options, Some(&*app.opts.system_title));
	Ok(Html(page.render(&view)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_request_values_unwraps_envelope() {
		let body = json!({ "values": { "title": "A", "type": "home" } });
		assert_eq!(request_values(body), json!({ "title": "A", "type": "home" }));

		let bare = json!({ "title": "A", "type": "home" });
		assert_eq!(request_values(bare.clone()), bare);
	}

	#[test]
	fn test_parse_values_reports_validation_error() {
		let res: ClResult<CreateLoginConfig> = parse_values(json!({ "title": "A" }));
		assert!(matches!(res, Err(Error::ValidationError(_))));
	}
}

// vim: ts=4
