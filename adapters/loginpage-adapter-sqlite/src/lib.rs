//! SQLite implementation of the login configuration adapter.
//!
//! Writes that have to keep a single enabled configuration per type run in
//! one transaction whose first statement is a write, so concurrent writers
//! queue on the database lock instead of failing a lock upgrade. Timestamps
//! are unix milliseconds, strictly increasing across writes.

#![forbid(unsafe_code)]

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use loginpage_types::config_adapter::{
	CreateLoginConfig, ListLoginConfigOptions, LoginConfigAdapter, UpdateLoginConfig,
};
use loginpage_types::login_config::LoginConfig;
use loginpage_types::prelude::*;

mod login_config;
mod schema;
mod utils;

#[derive(Debug)]
pub struct LoginConfigAdapterSqlite {
	db: SqlitePool,
}

impl LoginConfigAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await?;
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("login config database opened: {}", path.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl LoginConfigAdapter for LoginConfigAdapterSqlite {
	async fn list_login_configs(&self, opts: &ListLoginConfigOptions) -> ClResult<Vec<LoginConfig>> {
		login_config::list(&self.db, opts).await
	}

	async fn read_login_config(&self, id: ConfigId) -> ClResult<LoginConfig> {
		login_config::read(&self.db, id).await
	}

	async fn create_login_config(&self, values: &CreateLoginConfig) -> ClResult<LoginConfig> {
		login_config::create(&self.db, values).await
	}

	async fn update_login_config(
		&self,
		id: ConfigId,
		values: &UpdateLoginConfig,
	) -> ClResult<LoginConfig> {
		login_config::update(&self.db, id, values).await
	}

	async fn delete_login_config(&self, id: ConfigId) -> ClResult<()> {
		login_config::delete(&self.db, id).await
	}

	async fn list_active_login_configs(
		&self,
		typ: Option<&str>,
		limit: u32,
	) -> ClResult<Vec<LoginConfig>> {
		login_config::list_active(&self.db, typ, limit).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	async fn insert_raw(db: &SqlitePool, typ: &str, updated_at: i64) -> i64 {
		sqlx::query(
			"INSERT INTO login_configs (title, type, enabled, options, created_at, updated_at)
			VALUES ('raw', ?1, 1, '{}', ?2, ?2)",
		)
		.bind(typ)
		.bind(updated_at)
		.execute(db)
		.await
		.unwrap()
		.last_insert_rowid()
	}

	#[tokio::test]
	async fn test_active_tie_break_prefers_recent_then_highest_id() {
		let tmp = TempDir::new().unwrap();
		let adapter = LoginConfigAdapterSqlite::new(tmp.path().join("login.db")).await.unwrap();

		let older = insert_raw(&adapter.db, "home", 100).await;
		let first = insert_raw(&adapter.db, "home", 200).await;
		let second = insert_raw(&adapter.db, "home", 200).await;
		assert!(older < first && first < second);

		let active = adapter.list_active_login_configs(Some("home"), 2).await.unwrap();
		assert_eq!(active.len(), 2);
		assert_eq!(active[0].id, ConfigId(second));
		assert_eq!(active[1].id, ConfigId(first));
	}

	#[tokio::test]
	async fn test_malformed_stored_options_read_as_empty() {
		let tmp = TempDir::new().unwrap();
		let adapter = LoginConfigAdapterSqlite::new(tmp.path().join("login.db")).await.unwrap();

		let id = sqlx::query(
			"INSERT INTO login_configs (title, type, enabled, options) VALUES ('bad', 'home', 1, '{oops')",
		)
		.execute(&adapter.db)
		.await
		.unwrap()
		.last_insert_rowid();

		let config = adapter.read_login_config(ConfigId(id)).await.unwrap();
		assert_eq!(config.options, Default::default());
	}
}

// vim: ts=4
