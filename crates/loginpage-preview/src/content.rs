//! Left-hand region of the sign-in screen.
//!
//! Exactly one content source is rendered, selected by `leftContentType`.
//! The payloads of the other two modes may still be present in the options
//! document but are never looked at.

use serde::Serialize;

use loginpage_types::login_config::{ContentMode, LoginOptions};

/// Background shown in image mode when no image is configured
pub const DEFAULT_BACKGROUND_URL: &str =
	"https://bing.biturl.top/?resolution=1920&format=image&index=0&mkt=zh-CN";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LeftContent {
	/// Full-bleed background image
	Background { image_url: String },
	/// Inline markup in an isolated region, empty renders nothing
	Markup { html: String },
	/// Embedded page in an isolated frame, empty renders an empty frame
	Frame { src: String },
}

impl LeftContent {
	pub fn mode(&self) -> ContentMode {
		match self {
			LeftContent::Background { .. } => ContentMode::Image,
			LeftContent::Markup { .. } => ContentMode::Html,
			LeftContent::Frame { .. } => ContentMode::Url,
		}
	}

	/// True if nothing visible is produced
	pub fn is_blank(&self) -> bool {
		match self {
			LeftContent::Background { .. } => false,
			LeftContent::Markup { html } => html.is_empty(),
			LeftContent::Frame { src } => src.is_empty(),
		}
	}
}

pub fn render(options: &LoginOptions) -> LeftContent {
	match options.content_mode() {
		ContentMode::Image => LeftContent::Background {
			image_url: options
				.left_image
				.as_deref()
				.filter(|url| !url.is_empty())
				.unwrap_or(DEFAULT_BACKGROUND_URL)
				.to_string(),
		},
		ContentMode::Html => {
			LeftContent::Markup { html: options.left_html.clone().unwrap_or_default() }
		}
		ContentMode::Url => LeftContent::Frame { src: options.left_url.clone().unwrap_or_default() },
	}
}


// vim: ts=4
