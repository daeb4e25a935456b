//! Known configuration types and the drafts an editor starts from.

use serde_json::Value;

use loginpage_types::login_config::{ContentMode, LoginConfig, LoginOptions, UseSystemName, HOME_TYPE};

use crate::content::DEFAULT_BACKGROUND_URL;
use crate::controller::{Draft, PreviewFlags};
use crate::layout;

pub const DEFAULT_ICP: &str =
	r#"<div>Modified by <a href="https://www.taichuy.com/" target="_blank">太初y</a></div>"#;

#[derive(Debug)]
pub struct LoginType {
	pub name: &'static str,
	pub title: &'static str,
	fallback: Option<fn() -> LoginOptions>,
}

impl LoginType {
	/// Options a new draft of this type starts from before the active
	/// configuration is applied
	pub fn fallback_options(&self) -> Option<LoginOptions> {
		self.fallback.map(|f| f())
	}
}

static LOGIN_TYPES: &[LoginType] =
	&[LoginType { name: HOME_TYPE, title: "Home configuration", fallback: Some(home_fallback) }];

pub fn login_types() -> &'static [LoginType] {
	LOGIN_TYPES
}

pub fn login_type(name: &str) -> Option<&'static LoginType> {
	LOGIN_TYPES.iter().find(|t| t.name == name)
}

fn home_fallback() -> LoginOptions {
	LoginOptions {
		use_system_name: Some(UseSystemName::Yes),
		left_content_type: Some(ContentMode::Image),
		left_image: Some(DEFAULT_BACKGROUND_URL.into()),
		theme_color: Some(layout::DEFAULT_THEME_COLOR.into()),
		font_color: Some(layout::DEFAULT_FONT_COLOR.into()),
		form_theme_color: Some(layout::DEFAULT_FORM_THEME_COLOR.into()),
		form_font_color: Some(layout::DEFAULT_FORM_FONT_COLOR.into()),
		button_bg_color: Some(layout::DEFAULT_BUTTON_BG_COLOR.into()),
		button_text_color: Some(layout::DEFAULT_FORM_FONT_COLOR.into()),
		copyright: Some(layout::DEFAULT_COPYRIGHT.into()),
		icp: Some(DEFAULT_ICP.into()),
		..Default::default()
	}
}

/// Shallow merge, keys present in `top` win
pub fn overlay(base: &LoginOptions, top: &LoginOptions) -> LoginOptions {
	match (serde_json::to_value(base), serde_json::to_value(top)) {
		(Ok(Value::Object(mut merged)), Ok(Value::Object(top))) => {
			merged.extend(top);
			LoginOptions::from_value(Value::Object(merged))
		}
		_ => top.clone(),
	}
}

impl Draft {
	/// Draft for a new configuration of `typ`, seeded from the currently
	/// active configuration of that type if there is one
	pub fn for_new(typ: &str, active: Option<&LoginConfig>) -> Draft {
		let active_options = active.map(|cfg| &cfg.options);
		let options = match (login_type(typ).and_then(LoginType::fallback_options), active_options) {
			(Some(fallback), Some(active)) => overlay(&fallback, active),
			(Some(fallback), None) => fallback,
			(None, Some(active)) => active.clone(),
			(None, None) => LoginOptions::default(),
		};

		Draft {
			title: active.map(|cfg| cfg.title.clone()).unwrap_or_default(),
			typ: typ.to_string(),
			enabled: active.map_or(true, |cfg| cfg.enabled),
			description: active.and_then(|cfg| cfg.description.clone()),
			options,
			preview: PreviewFlags::default(),
		}
	}

	/// Draft mirroring a stored configuration
	pub fn for_edit(config: &LoginConfig) -> Draft {
		Draft {
			title: config.title.clone(),
			typ: config.typ.clone(),
			enabled: config.enabled,
			description: config.description.clone(),
			options: config.options.clone(),
			preview: PreviewFlags::default(),
		}
	}
}


// vim: ts=4
