//! Preview state of a configuration editor.
//!
//! The draft follows every edit. The displayed snapshot, which the preview
//! renders, follows the draft either after a debounce window (live mode) or
//! when a refresh is requested (manual mode).

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

use loginpage_types::config_adapter::{CreateLoginConfig, UpdateLoginConfig};
use loginpage_types::login_config::LoginOptions;
use loginpage_types::types::Patch;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

// PreviewFlags //
//**************//
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreviewFlags {
	pub live: bool,
	pub version: Option<u64>,
}

impl Default for PreviewFlags {
	fn default() -> Self {
		PreviewFlags { live: true, version: None }
	}
}

// Draft //
//*******//
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
	pub title: String,
	#[serde(rename = "type")]
	pub typ: String,
	pub enabled: bool,
	pub description: Option<String>,
	pub options: LoginOptions,
	pub preview: PreviewFlags,
}

impl Draft {
	pub fn into_create(self) -> CreateLoginConfig {
		CreateLoginConfig {
			title: self.title,
			typ: self.typ,
			enabled: self.enabled,
			description: self.description,
			options: self.options,
		}
	}

	/// Full update writing every field of the draft
	pub fn into_update(self) -> UpdateLoginConfig {
		UpdateLoginConfig {
			title: Patch::Value(self.title),
			typ: Patch::Value(self.typ),
			enabled: Patch::Value(self.enabled),
			description: self.description.map_or(Patch::Null, Patch::Value),
			options: Patch::Value(self.options),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewMode {
	Live,
	Manual,
}

#[derive(Debug)]
struct Pending {
	due: Instant,
	snapshot: Draft,
}

// PreviewStateController //
//************************//
#[derive(Debug)]
pub struct PreviewStateController {
	draft: Draft,
	displayed: Draft,
	pending: Option<Pending>,
	last_applied_version: Option<u64>,
	propagations: u64,
	debounce: Duration,
}

impl PreviewStateController {
	pub fn new(draft: Draft, debounce: Duration) -> Self {
		PreviewStateController {
			displayed: draft.clone(),
			last_applied_version: draft.preview.version,
			draft,
			pending: None,
			propagations: 0,
			debounce,
		}
	}

	pub fn draft(&self) -> &Draft {
		&self.draft
	}

	pub fn displayed(&self) -> &Draft {
		&self.displayed
	}

	pub fn mode(&self) -> PreviewMode {
		if self.draft.preview.live { PreviewMode::Live } else { PreviewMode::Manual }
	}

	/// Number of times the displayed snapshot was replaced
	pub fn propagations(&self) -> u64 {
		self.propagations
	}

	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|p| p.due)
	}

	/// Applies an edit to the draft. Returns true if the displayed snapshot
	/// changed right away.
	pub fn edit<F>(&mut self, f: F, now: Instant) -> bool
	where
		F: FnOnce(&mut Draft),
	{
		f(&mut self.draft);

		match self.mode() {
			PreviewMode::Live => {
				self.pending = Some(Pending { due: now + self.debounce, snapshot: self.draft.clone() });
				false
			}
			// A pending live propagation is left alone and still fires
			PreviewMode::Manual => match self.draft.preview.version {
				Some(version) if self.last_applied_version != Some(version) => {
					self.last_applied_version = Some(version);
					self.apply(self.draft.clone());
					true
				}
				_ => false,
			},
		}
	}

	/// Fires the pending propagation if it is due. Returns true if the
	/// displayed snapshot changed.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.pending.take() {
			Some(pending) if pending.due <= now => {
				self.apply(pending.snapshot);
				true
			}
			pending => {
				self.pending = pending;
				false
			}
		}
	}

	/// Bumps the preview version, which refreshes the preview in manual mode
	pub fn request_refresh(&mut self, now: Instant) -> bool {
		self.edit(|draft| draft.preview.version = Some(draft.preview.version.map_or(1, |v| v + 1)), now)
	}

	pub fn set_live(&mut self, live: bool, now: Instant) -> bool {
		self.edit(|draft| draft.preview.live = live, now)
	}

	pub fn into_create(self) -> CreateLoginConfig {
		self.draft.into_create()
	}

	pub fn into_update(self) -> UpdateLoginConfig {
		self.draft.into_update()
	}

	fn apply(&mut self, snapshot: Draft) {
		self.displayed = snapshot;
		self.propagations += 1;
	}
}


// vim: ts=4
