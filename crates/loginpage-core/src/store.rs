//! Login configuration store.
//!
//! Writes of one configuration type are serialized by an async mutex per type,
//! and each write reaches the adapter as a single transactional call. Together
//! these keep at most one enabled configuration per type.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use loginpage_types::auth::AuthCtx;
use loginpage_types::config_adapter::{
	CreateLoginConfig, ListLoginConfigOptions, LoginConfigAdapter, UpdateLoginConfig,
};
use loginpage_types::login_config::{HOME_TYPE, LoginConfig};
use loginpage_types::prelude::*;

type TypeLock = Arc<tokio::sync::Mutex<()>>;

#[derive(Debug)]
pub struct LoginConfigStore {
	adapter: Arc<dyn LoginConfigAdapter>,
	type_locks: Mutex<HashMap<Box<str>, TypeLock>>,
}

impl LoginConfigStore {
	pub fn new(adapter: Arc<dyn LoginConfigAdapter>) -> Self {
		LoginConfigStore { adapter, type_locks: Mutex::new(HashMap::new()) }
	}

	/// Runs `fut` holding the write lock of `typ`. The lock entry is dropped
	/// once no other writer refers to it.
	async fn with_type_lock<T>(&self, typ: &str, fut: impl Future<Output = T>) -> T {
		let lock = self.type_locks.lock().entry(typ.into()).or_default().clone();
		let res = {
			let _guard = lock.lock().await;
			fut.await
		};
		drop(lock);

		let mut locks = self.type_locks.lock();
		if locks.get(typ).is_some_and(|lock| Arc::strong_count(lock) == 1) {
			locks.remove(typ);
		}
		res
	}

	pub async fn list(&self, opts: &ListLoginConfigOptions) -> ClResult<Vec<LoginConfig>> {
		self.adapter.list_login_configs(opts).await
	}

	pub async fn read(&self, id: ConfigId) -> ClResult<LoginConfig> {
		self.adapter.read_login_config(id).await
	}

	/// Creates a configuration. An enabled one replaces the active
	/// configuration of its type.
	pub async fn create(&self, values: &CreateLoginConfig) -> ClResult<LoginConfig> {
		values.validate()?;

		let config =
			self.with_type_lock(&values.typ, self.adapter.create_login_config(values)).await?;
		info!(id = %config.id, typ = %config.typ, enabled = config.enabled, "login config created");
		Ok(config)
	}

	/// Applies a partial update. If the row ends up enabled every other row of
	/// its resulting type is disabled.
	pub async fn update(&self, id: ConfigId, values: &UpdateLoginConfig) -> ClResult<LoginConfig> {
		values.validate()?;

		let current = self.adapter.read_login_config(id).await?;
		let typ = values.effective_type(&current.typ);

		let config = self.with_type_lock(typ, self.adapter.update_login_config(id, values)).await?;
		info!(id = %config.id, typ = %config.typ, enabled = config.enabled, "login config updated");
		Ok(config)
	}

	pub async fn delete(&self, id: ConfigId) -> ClResult<()> {
		self.adapter.delete_login_config(id).await?;
		info!(id = %id, "login config deleted");
		Ok(())
	}

	/// Currently active configuration, optionally of one type.
	///
	/// Unauthenticated callers may only ask for the home configuration.
	pub async fn get_active_config(
		&self,
		typ: Option<&str>,
		auth: Option<&AuthCtx>,
	) -> ClResult<Option<LoginConfig>> {
		if auth.is_none() && typ != Some(HOME_TYPE) {
			return Err(Error::PermissionDenied);
		}

		let mut active = self.adapter.list_active_login_configs(typ, 2).await?;
		if let Some(typ) = typ
			&& active.len() > 1
		{
			warn!(
				typ = %typ,
				ids = ?active.iter().map(|c| c.id).collect::<Vec<_>>(),
				"more than one enabled login config, using the most recent"
			);
		}

		Ok(if active.is_empty() { None } else { Some(active.swap_remove(0)) })
	}
}


// vim: ts=4
