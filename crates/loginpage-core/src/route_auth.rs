//! Bearer token authentication

const TOKEN_EXPIRE: u64 = 8; /* hours */

use axum::{
	body::Body,
	extract::State,
	http::{Request, header},
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time;

use crate::extract::Auth;
use crate::prelude::*;
use loginpage_types::auth::AuthCtx;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken<S> {
	pub sub: S,
	pub exp: u64,
	pub r: Option<S>,
}

pub fn generate_access_token(secret: &str, id_tag: &str, roles: Option<&str>) -> ClResult<Box<str>> {
	let expire = time::SystemTime::now()
		.duration_since(time::UNIX_EPOCH)
		.map_err(|_| Error::Internal("system clock before epoch".into()))?
		.as_secs() + 3600 * TOKEN_EXPIRE;

	let token = encode(
		&Header::new(Algorithm::HS256),
		&AuthToken::<&str> { sub: id_tag, exp: expire, r: roles },
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|err| {
		error!("Failed to sign access token: {}", err);
		Error::Internal("token signing failed".into())
	})?;

	Ok(token.into())
}

pub fn validate_token(secret: &str, token: &str) -> ClResult<AuthCtx> {
	let decoding_key = DecodingKey::from_secret(secret.as_bytes());

	let token_data =
		decode::<AuthToken<Box<str>>>(token, &decoding_key, &Validation::new(Algorithm::HS256))
			.map_err(|err| {
				debug!("Rejected access token: {}", err);
				Error::Unauthorized
			})?;

	Ok(AuthCtx {
		id_tag: token_data.claims.sub,
		roles: token_data
			.claims
			.r
			.unwrap_or_default()
			.split(',')
			.filter(|r| !r.is_empty())
			.map(Box::from)
			.collect(),
	})
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
	req.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response> {
	let token = bearer_token(&req).ok_or(Error::Unauthorized)?;
	let claims = validate_token(&app.opts.jwt_secret, token)?;

	req.extensions_mut().insert(Auth(claims));

	Ok(next.run(req).await)
}

/// Attaches the caller if a valid token is present, never rejects
pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response> {
	if let Some(token) = bearer_token(&req)
		&& let Ok(claims) = validate_token(&app.opts.jwt_secret, token)
	{
		req.extensions_mut().insert(Auth(claims));
	}

	Ok(next.run(req).await)
}


// vim: ts=4
