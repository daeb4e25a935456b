//! Login configuration record and its options document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::prelude::*;

/// The configuration type served to unauthenticated callers
pub const HOME_TYPE: &str = "home";

/// Content source of the left-hand region of the sign-in screen.
///
/// Absent or unrecognized values select `Image`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
	#[default]
	Image,
	Html,
	Url,
}

impl ContentMode {
	pub fn parse(s: &str) -> ContentMode {
		match s {
			"html" => ContentMode::Html,
			"url" => ContentMode::Url,
			_ => ContentMode::Image,
		}
	}
}

impl<'de> Deserialize<'de> for ContentMode {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(ContentMode::parse(&s))
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseSystemName {
	#[default]
	Yes,
	No,
}

/// Options document of a login configuration.
///
/// Every field is optional; consumers apply their own defaults. Keys this
/// version does not know about, and known keys holding a value of the wrong
/// type, are kept in `extra` and written back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOptions {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub left_content_type: Option<ContentMode>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub left_image: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub left_html: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub left_url: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub use_system_name: Option<UseSystemName>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub custom_system_name: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub theme_color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	/// Kept as written, so `1` stays an integer
	pub theme_opacity: Option<Number>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub font_color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub form_theme_color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub form_font_color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub button_bg_color: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub button_text_color: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	/// In the order the operator chose
	pub login_methods: Option<Vec<String>>,

	/// Markdown
	#[serde(skip_serializing_if = "Option::is_none")]
	pub copyright: Option<String>,
	/// Markdown
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icp: Option<String>,

	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Removes `key` from the map and converts it. A value of the wrong type is
/// logged and put back, so it survives in `extra`.
fn take_field<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
	let value = map.remove(key)?;
	if value.is_null() {
		return None;
	}
	match serde_json::from_value(value.clone()) {
		Ok(v) => Some(v),
		Err(err) => {
			warn!(key = %key, "Ignoring malformed login option: {}", err);
			map.insert(key.to_string(), value);
			None
		}
	}
}

impl<'de> Deserialize<'de> for LoginOptions {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let map = Map::<String, Value>::deserialize(deserializer)?;
		Ok(LoginOptions::from_map(map))
	}
}

impl LoginOptions {
	fn from_map(mut map: Map<String, Value>) -> LoginOptions {
		LoginOptions {
			left_content_type: take_field(&mut map, "leftContentType"),
			left_image: take_field(&mut map, "leftImage"),
			left_html: take_field(&mut map, "leftHtml"),
			left_url: take_field(&mut map, "leftUrl"),
			use_system_name: take_field(&mut map, "useSystemName"),
			custom_system_name: take_field(&mut map, "customSystemName"),
			theme_color: take_field(&mut map, "themeColor"),
			theme_opacity: take_field(&mut map, "themeOpacity"),
			font_color: take_field(&mut map, "fontColor"),
			form_theme_color: take_field(&mut map, "formThemeColor"),
			form_font_color: take_field(&mut map, "formFontColor"),
			button_bg_color: take_field(&mut map, "buttonBgColor"),
			button_text_color: take_field(&mut map, "buttonTextColor"),
			login_methods: take_field(&mut map, "loginMethods"),
			copyright: take_field(&mut map, "copyright"),
			icp: take_field(&mut map, "icp"),
			extra: map,
		}
	}

	pub fn content_mode(&self) -> ContentMode {
		self.left_content_type.unwrap_or_default()
	}

	pub fn opacity(&self) -> Option<f64> {
		self.theme_opacity.as_ref().and_then(Number::as_f64)
	}

	/// Interpret an options value received at the API boundary.
	///
	/// Accepts an object or a JSON string holding one. Anything unparsable is
	/// logged and treated as an empty document.
	pub fn from_value(value: Value) -> LoginOptions {
		match value {
			Value::Null => LoginOptions::default(),
			Value::String(s) => LoginOptions::parse_stored(&s),
			Value::Object(map) => LoginOptions::from_map(map),
			value => {
				warn!("Malformed login options, using empty document: {}", value);
				LoginOptions::default()
			}
		}
	}

	/// Parse a serialized options document, falling back to an empty one
	pub fn parse_stored(s: &str) -> LoginOptions {
		if s.trim().is_empty() {
			return LoginOptions::default();
		}
		serde_json::from_str(s).unwrap_or_else(|err| {
			warn!("Malformed login options, using empty document: {}", err);
			LoginOptions::default()
		})
	}

	pub fn to_json_string(&self) -> ClResult<String> {
		serde_json::to_string(self).map_err(|err| {
			error!("Failed to serialize login options: {}", err);
			Error::Parse
		})
	}
}

/// Persisted login configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfig {
	pub id: ConfigId,
	pub title: String,
	#[serde(rename = "type")]
	pub typ: String,
	pub enabled: bool,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub options: LoginOptions,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}


// vim: ts=4
