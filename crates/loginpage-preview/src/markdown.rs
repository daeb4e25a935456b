//! Markdown rendering of the copyright and ICP notes.
//!
//! Raw HTML is passed through, so notes written as markup render unchanged.

use pulldown_cmark::{Options, Parser, html};

pub fn to_html(source: &str) -> String {
	let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_SMART_PUNCTUATION;
	let mut out = String::with_capacity(source.len() * 3 / 2);
	html::push_html(&mut out, Parser::new_ext(source, options));
	out
}


// vim: ts=4
