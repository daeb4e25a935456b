//! Error type shared by every crate of the workspace.

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The addressed record does not exist
	NotFound,
	/// The caller is known but may not perform the operation
	PermissionDenied,
	/// Missing or invalid credentials
	Unauthorized,
	/// Input rejected before touching storage
	ValidationError(String),
	/// Storage failure, details are logged where it happened
	DbError,
	/// Serialized data could not be parsed
	Parse,
	/// Invalid startup configuration
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::ValidationError(_) | Error::Parse => StatusCode::BAD_REQUEST,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-CORE-NOTFOUND",
			Error::PermissionDenied => "E-AUTH-NOPERM",
			Error::Unauthorized => "E-AUTH-UNAUTH",
			Error::ValidationError(_) => "E-VAL-INVALID",
			Error::Parse => "E-VAL-PARSE",
			Error::DbError => "E-CORE-DBERR",
			Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => "E-CORE-INTERNAL",
		}
	}

	/// Terse, user-visible message. Internal details stay in the logs.
	fn message(&self) -> String {
		match self {
			Error::NotFound => "Configuration not found".to_string(),
			Error::PermissionDenied => "Forbidden".to_string(),
			Error::Unauthorized => "Authentication required".to_string(),
			Error::ValidationError(msg) => msg.clone(),
			Error::Parse => "Malformed request".to_string(),
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				"Internal error".to_string()
			}
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(_err: serde_json::Error) -> Self {
		Self::Parse
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!("request failed: {}", self);
		}
		let body = serde_json::json!({
			"error": {
				"code": self.code(),
				"message": self.message(),
			}
		});
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
