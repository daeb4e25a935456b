//! Authentication context shared between the middleware and the handlers.

use serde::{Deserialize, Serialize};

/// Authenticated caller, inserted into request extensions by the auth middleware
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCtx {
	#[serde(rename = "idTag")]
	pub id_tag: Box<str>,
	pub roles: Box<[Box<str>]>,
}

// vim: ts=4
