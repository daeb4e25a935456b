//! Everything the sign-in screen needs, derived from an options document.

use serde::Serialize;

use loginpage_types::login_config::{LoginOptions, UseSystemName};

use crate::color;
use crate::content::{self, LeftContent};
use crate::markdown;

pub const DEFAULT_THEME_COLOR: &str = "#000";
pub const DEFAULT_FONT_COLOR: &str = "#fff";
pub const DEFAULT_FORM_THEME_COLOR: &str = "rgba(255,255,255,0.12)";
pub const DEFAULT_FORM_FONT_COLOR: &str = "#fff";
pub const DEFAULT_BUTTON_BG_COLOR: &str = "rgba(255,255,255,0.2)";
pub const DEFAULT_COPYRIGHT: &str =
	r#"<div>Powered by <a href="https://www.nocobase.com/" target="_blank">NocoBase</a></div>"#;
pub const DEFAULT_LOGIN_METHOD: &str = "password";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStyle {
	pub background: String,
	pub font_color: String,
	pub button_background: String,
	pub button_text_color: String,
}

/// Resolved sign-in screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInView {
	pub left: LeftContent,
	pub panel_background: String,
	pub font_color: String,
	pub system_name: Option<String>,
	pub form: FormStyle,
	pub copyright: String,
	pub icp: Option<String>,
	pub login_methods: Vec<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
	value.map(String::as_str).filter(|s| !s.is_empty())
}

impl SignInView {
	/// Derives the view. `system_title` is the host's own name, shown unless
	/// the options ask for a custom one.
	pub fn derive(options: &LoginOptions, system_title: Option<&str>) -> SignInView {
		let theme_color = non_empty(options.theme_color.as_ref()).unwrap_or(DEFAULT_THEME_COLOR);
		let opacity = options.opacity().unwrap_or(1.0);

		let system_name = match options.use_system_name.unwrap_or_default() {
			UseSystemName::No => options.custom_system_name.clone(),
			UseSystemName::Yes => system_title.map(str::to_string),
		};

		let form_font_color =
			non_empty(options.form_font_color.as_ref()).unwrap_or(DEFAULT_FORM_FONT_COLOR);
		let form = FormStyle {
			background: non_empty(options.form_theme_color.as_ref())
				.unwrap_or(DEFAULT_FORM_THEME_COLOR)
				.to_string(),
			font_color: form_font_color.to_string(),
			button_background: non_empty(options.button_bg_color.as_ref())
				.unwrap_or(DEFAULT_BUTTON_BG_COLOR)
				.to_string(),
			button_text_color: non_empty(options.button_text_color.as_ref())
				.unwrap_or(form_font_color)
				.to_string(),
		};

		let mut login_methods: Vec<String> = Vec::new();
		for method in options.login_methods.iter().flatten().filter(|m| !m.is_empty()) {
			if !login_methods.contains(method) {
				login_methods.push(method.clone());
			}
		}
		if login_methods.is_empty() {
			login_methods.push(DEFAULT_LOGIN_METHOD.to_string());
		}

		SignInView {
			left: content::render(options),
			panel_background: color::resolve(Some(theme_color), opacity),
			font_color: non_empty(options.font_color.as_ref())
				.unwrap_or(DEFAULT_FONT_COLOR)
				.to_string(),
			system_name,
			form,
			copyright: markdown::to_html(
				non_empty(options.copyright.as_ref()).unwrap_or(DEFAULT_COPYRIGHT),
			),
			icp: non_empty(options.icp.as_ref()).map(markdown::to_html),
			login_methods,
		}
	}
}


// vim: ts=4
