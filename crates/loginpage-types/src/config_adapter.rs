//! Adapter that stores login configurations.
//!
//! Implementations must make the "disable siblings, then write" sequence of
//! `create_login_config` and `update_login_config` a single atomic unit, so no
//! committed state ever has two enabled rows of the same type.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::fmt::Debug;

use crate::login_config::{LoginConfig, LoginOptions};
use crate::prelude::*;

fn default_enabled() -> bool {
	true
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<LoginOptions, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	Ok(LoginOptions::from_value(value))
}

fn deserialize_options_patch<'de, D>(deserializer: D) -> Result<Patch<LoginOptions>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
		Some(value) => Patch::Value(LoginOptions::from_value(value)),
		None => Patch::Null,
	})
}

fn require_text(field: &str, value: &str) -> ClResult<()> {
	if value.trim().is_empty() {
		return Err(Error::ValidationError(format!("{} is required", field)));
	}
	Ok(())
}

/// Values of a new login configuration
#[derive(Clone, Debug, Deserialize)]
pub struct CreateLoginConfig {
	pub title: String,
	#[serde(rename = "type")]
	pub typ: String,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default, deserialize_with = "deserialize_options")]
	pub options: LoginOptions,
}

impl CreateLoginConfig {
	pub fn validate(&self) -> ClResult<()> {
		require_text("title", &self.title)?;
		require_text("type", &self.typ)
	}
}

/// Partial update of a login configuration
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateLoginConfig {
	#[serde(default)]
	pub title: Patch<String>,
	#[serde(default, rename = "type")]
	pub typ: Patch<String>,
	#[serde(default)]
	pub enabled: Patch<bool>,
	#[serde(default)]
	pub description: Patch<String>,
	#[serde(default, deserialize_with = "deserialize_options_patch")]
	pub options: Patch<LoginOptions>,
}

impl UpdateLoginConfig {
	pub fn validate(&self) -> ClResult<()> {
		match &self.title {
			Patch::Null => return Err(Error::ValidationError("title is required".into())),
			Patch::Value(title) => require_text("title", title)?,
			Patch::Undefined => {}
		}
		match &self.typ {
			Patch::Null => return Err(Error::ValidationError("type is required".into())),
			Patch::Value(typ) => require_text("type", typ)?,
			Patch::Undefined => {}
		}
		if self.enabled.is_null() {
			return Err(Error::ValidationError("enabled cannot be null".into()));
		}
		Ok(())
	}

	/// Type the row will have after the update
	pub fn effective_type<'a>(&'a self, current: &'a str) -> &'a str {
		self.typ.value().map_or(current, String::as_str)
	}

	/// Enabled flag the row will have after the update
	pub fn effective_enabled(&self, current: bool) -> bool {
		self.enabled.value().copied().unwrap_or(current)
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListLoginConfigOptions {
	#[serde(default, rename = "type")]
	pub typ: Option<String>,
	#[serde(default)]
	pub enabled: Option<bool>,
}

#[async_trait]
pub trait LoginConfigAdapter: Debug + Send + Sync {
	/// Lists configurations ordered by id
	async fn list_login_configs(&self, opts: &ListLoginConfigOptions) -> ClResult<Vec<LoginConfig>>;

	/// Reads a configuration, `Error::NotFound` if it does not exist
	async fn read_login_config(&self, id: ConfigId) -> ClResult<LoginConfig>;

	/// Inserts a configuration. When it is enabled every other enabled row of
	/// the same type is disabled in the same transaction.
	async fn create_login_config(&self, values: &CreateLoginConfig) -> ClResult<LoginConfig>;

	/// Applies a partial update. When the resulting row is enabled every other
	/// enabled row of its resulting type is disabled in the same transaction.
	async fn update_login_config(
		&self,
		id: ConfigId,
		values: &UpdateLoginConfig,
	) -> ClResult<LoginConfig>;

	/// Deletes a configuration, `Error::NotFound` if it does not exist
	async fn delete_login_config(&self, id: ConfigId) -> ClResult<()>;

	/// Enabled configurations, optionally of one type, most recently updated
	/// first (higher id first on equal timestamps), at most `limit` rows
	async fn list_active_login_configs(
		&self,
		typ: Option<&str>,
		limit: u32,
	) -> ClResult<Vec<LoginConfig>>;
}


// vim: ts=4
