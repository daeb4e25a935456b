//! Sign-in page rendering with Handlebars

use handlebars::Handlebars;
use serde::Serialize;

use crate::prelude::*;
use loginpage_preview::SignInView;
use loginpage_preview::content::LeftContent;

const SIGNIN_TEMPLATE: &str = "signin";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageContext<'a> {
	title: &'a str,
	view: &'a SignInView,
	background: Option<&'a str>,
	markup: Option<&'a str>,
	frame: Option<&'a str>,
	empty_frame: bool,
}

/// Renders `SignInView`s into a complete HTML page
#[derive(Debug)]
pub struct SignInPage {
	handlebars: Handlebars<'static>,
}

impl SignInPage {
	pub fn new() -> ClResult<Self> {
		let mut handlebars = Handlebars::new();
		handlebars
			.register_template_string(SIGNIN_TEMPLATE, include_str!("../templates/signin.html.hbs"))
			.map_err(|err| {
				error!("Failed to compile sign-in template: {}", err);
				Error::ConfigError("invalid sign-in template".into())
			})?;
		Ok(Self { handlebars })
	}

	pub fn render(&self, view: &SignInView) -> ClResult<String> {
		let (background, markup, frame) = match &view.left {
			LeftContent::Background { image_url } => (Some(image_url.as_str()), None, None),
			LeftContent::Markup { html } => (None, Some(html.as_str()).filter(|h| !h.is_empty()), None),
			LeftContent::Frame { src } => (None, None, Some(src.as_str()).filter(|s| !s.is_empty())),
		};
		let context = PageContext {
			title: view.system_name.as_deref().unwrap_or("Sign in"),
			view,
			background,
			markup,
			frame,
			empty_frame: matches!(&view.left, LeftContent::Frame { src } if src.is_empty()),
		};

		self.handlebars.render(SIGNIN_TEMPLATE, &context).map_err(|err| {
			error!("Failed to render sign-in page: {}", err);
			Error::Internal("sign-in page rendering failed".into())
		})
	}
}


// vim: ts=4
