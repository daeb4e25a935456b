//! Color resolution for the preview and the sign-in page.
//!
//! Colors are stored as the strings the color picker produces: `#RGB`,
//! `#RRGGBB` or an already composed `rgba(...)` value.

pub const TRANSPARENT: &str = "transparent";

/// Converts a stored color and an opacity into a renderable color.
///
/// - empty or missing color: `transparent`
/// - not a hex color: returned unchanged, opacity is ignored
/// - opacity 1: hex returned unchanged
/// - otherwise `rgba(r,g,b,opacity)`; a hex of the wrong length resolves to
///   black, an unparsable channel to 0
pub fn resolve(color: Option<&str>, opacity: f64) -> String {
	let Some(color) = color.filter(|c| !c.is_empty()) else {
		return TRANSPARENT.to_string();
	};
	if !color.starts_with('#') {
		return color.to_string();
	}
	let opacity = clamp_unit(opacity, 1.0);
	if opacity >= 1.0 {
		return color.to_string();
	}
	let (r, g, b) = hex_channels(color);
	format!("rgba({},{},{},{})", r, g, b, opacity)
}

/// Value written back by the color picker: hex when opaque, rgba otherwise
pub fn picker_value(r: u8, g: u8, b: u8, alpha: f64) -> String {
	let alpha = clamp_unit(alpha, 1.0);
	if alpha >= 1.0 {
		format!("#{:02x}{:02x}{:02x}", r, g, b)
	} else {
		format!("rgba({},{},{},{})", r, g, b, alpha)
	}
}

/// Formats an opacity for the percentage input (`0.5` -> `50%`)
pub fn format_percent(value: Option<f64>) -> String {
	match value {
		Some(v) if v.is_finite() => format!("{:.0}%", v * 100.0),
		_ => String::new(),
	}
}

/// Parses the percentage input back into an opacity (`50%` -> `0.5`).
/// Unparsable input yields 0.
pub fn parse_percent(input: &str) -> f64 {
	let parsed = input.trim().trim_end_matches('%').trim().parse::<f64>().unwrap_or(0.0);
	clamp_unit(parsed / 100.0, 0.0)
}

fn clamp_unit(value: f64, nan_default: f64) -> f64 {
	if value.is_nan() { nan_default } else { value.clamp(0.0, 1.0) }
}

fn hex_channels(hex: &str) -> (u8, u8, u8) {
	let digits = &hex[1..];
	let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
	if !digits.is_ascii() {
		return (0, 0, 0);
	}
	match digits.len() {
		3 => {
			let doubled: Vec<String> = digits.chars().map(|c| format!("{}{}", c, c)).collect();
			(channel(&doubled[0]), channel(&doubled[1]), channel(&doubled[2]))
		}
		6 => (channel(&digits[0..2]), channel(&digits[2..4]), channel(&digits[4..6])),
		_ => (0, 0, 0),
	}
}


// vim: ts=4
