//! In-memory login configuration adapter.
//!
//! Every operation runs under one lock, which makes each call atomic. Used by
//! tests and for running the server without a database.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;

use loginpage_types::config_adapter::{
	CreateLoginConfig, ListLoginConfigOptions, LoginConfigAdapter, UpdateLoginConfig,
};
use loginpage_types::login_config::{LoginConfig, LoginOptions};
use loginpage_types::prelude::*;

#[derive(Debug, Default)]
struct MemoryState {
	last_id: i64,
	last_write: Timestamp,
	rows: BTreeMap<ConfigId, LoginConfig>,
}

impl MemoryState {
	fn next_id(&mut self) -> ConfigId {
		self.last_id += 1;
		ConfigId(self.last_id)
	}

	/// Write time, strictly increasing across writes
	fn next_write(&mut self) -> Timestamp {
		self.last_write = Timestamp::now_after(self.last_write);
		self.last_write
	}

	fn disable_siblings(&mut self, typ: &str, except: Option<ConfigId>, now: Timestamp) {
		for row in self.rows.values_mut() {
			if row.enabled && row.typ == typ && Some(row.id) != except {
				row.enabled = false;
				row.updated_at = now;
			}
		}
	}
}

#[derive(Debug, Default)]
pub struct MemoryLoginConfigAdapter {
	state: Mutex<MemoryState>,
}

impl MemoryLoginConfigAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores a row exactly as given, bypassing the single enabled row rule.
	/// The id is assigned by the adapter.
	pub fn insert_raw(&self, mut config: LoginConfig) -> ConfigId {
		let mut state = self.state.lock();
		config.id = state.next_id();
		let id = config.id;
		state.last_write = state.last_write.max(config.updated_at);
		state.rows.insert(id, config);
		id
	}
}

#[async_trait]
impl LoginConfigAdapter for MemoryLoginConfigAdapter {
	async fn list_login_configs(&self, opts: &ListLoginConfigOptions) -> ClResult<Vec<LoginConfig>> {
		let state = self.state.lock();
		Ok(state
			.rows
			.values()
			.filter(|c| opts.typ.as_ref().is_none_or(|typ| &c.typ == typ))
			.filter(|c| opts.enabled.is_none_or(|enabled| c.enabled == enabled))
			.cloned()
			.collect())
	}

	async fn read_login_config(&self, id: ConfigId) -> ClResult<LoginConfig> {
		self.state.lock().rows.get(&id).cloned().ok_or(Error::NotFound)
	}

	async fn create_login_config(&self, values: &CreateLoginConfig) -> ClResult<LoginConfig> {
		let mut state = self.state.lock();
		let now = state.next_write();
		if values.enabled {
			state.disable_siblings(&values.typ, None, now);
		}
		let config = LoginConfig {
			id: state.next_id(),
			title: values.title.clone(),
			typ: values.typ.clone(),
			enabled: values.enabled,
			description: values.description.clone(),
			options: values.options.clone(),
			created_at: now,
			updated_at: now,
		};
		state.rows.insert(config.id, config.clone());
		Ok(config)
	}

	async fn update_login_config(
		&self,
		id: ConfigId,
		values: &UpdateLoginConfig,
	) -> ClResult<LoginConfig> {
		let mut state = self.state.lock();
		if !state.rows.contains_key(&id) {
			return Err(Error::NotFound);
		}
		let now = state.next_write();
		let current = state.rows.get(&id).ok_or(Error::NotFound)?;

		let typ = values.effective_type(&current.typ).to_string();
		if values.effective_enabled(current.enabled) {
			state.disable_siblings(&typ, Some(id), now);
		}

		let row = state.rows.get_mut(&id).ok_or(Error::NotFound)?;
		if let Patch::Value(title) = &values.title {
			row.title.clone_from(title);
		}
		row.typ = typ;
		if let Patch::Value(enabled) = values.enabled {
			row.enabled = enabled;
		}
		match &values.description {
			Patch::Value(description) => row.description = Some(description.clone()),
			Patch::Null => row.description = None,
			Patch::Undefined => {}
		}
		match &values.options {
			Patch::Value(options) => row.options = options.clone(),
			Patch::Null => row.options = LoginOptions::default(),
			Patch::Undefined => {}
		}
		row.updated_at = now;

		Ok(row.clone())
	}

	async fn delete_login_config(&self, id: ConfigId) -> ClResult<()> {
		self.state.lock().rows.remove(&id).map(|_| ()).ok_or(Error::NotFound)
	}

	async fn list_active_login_configs(
		&self,
		typ: Option<&str>,
		limit: u32,
	) -> ClResult<Vec<LoginConfig>> {
		let state = self.state.lock();
		let mut active: Vec<LoginConfig> = state
			.rows
			.values()
			.filter(|c| c.enabled && typ.is_none_or(|typ| c.typ == typ))
			.cloned()
			.collect();
		active.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
		active.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
		Ok(active)
	}
}

// vim: ts=4
