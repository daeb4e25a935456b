//! Login configuration storage

use sqlx::{Row, Sqlite, SqlitePool, Transaction, sqlite::SqliteRow};

use crate::utils::*;
use loginpage_types::config_adapter::{CreateLoginConfig, ListLoginConfigOptions, UpdateLoginConfig};
use loginpage_types::login_config::{LoginConfig, LoginOptions};
use loginpage_types::prelude::*;

const COLUMNS: &str = "id, title, type, enabled, description, options, created_at, updated_at";

fn map_config(row: &SqliteRow) -> Result<LoginConfig, sqlx::Error> {
	let options: Option<String> = row.try_get("options")?;
	Ok(LoginConfig {
		id: ConfigId(row.try_get("id")?),
		title: row.try_get("title")?,
		typ: row.try_get("type")?,
		enabled: row.try_get("enabled")?,
		description: row.try_get("description")?,
		options: options.as_deref().map(LoginOptions::parse_stored).unwrap_or_default(),
		created_at: Timestamp(row.try_get("created_at")?),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

async fn read_one<'e, E>(db: E, id: ConfigId) -> ClResult<LoginConfig>
where
	E: sqlx::Executor<'e, Database = Sqlite>,
{
	let res = sqlx::query(&format!("SELECT {} FROM login_configs WHERE id = ?1", COLUMNS))
		.bind(id.0)
		.fetch_one(db)
		.await;

	map_res(res, map_config)
}

/// Begin a transaction that already holds the write lock, and pick its write
/// time. The time is read under the lock and kept after every stored
/// `updated_at`, so a writer that queued behind another never goes back in time.
async fn begin_write(db: &SqlitePool) -> ClResult<(Transaction<'static, Sqlite>, Timestamp)> {
	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	sqlx::query("UPDATE vars SET value = value WHERE key = 'db_version'")
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	let last: i64 = sqlx::query_scalar("SELECT coalesce(max(updated_at), 0) FROM login_configs")
		.fetch_one(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok((tx, Timestamp::now_after(Timestamp(last))))
}

/// List configurations, optionally filtered by type and enabled flag
pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListLoginConfigOptions,
) -> ClResult<Vec<LoginConfig>> {
	let mut query = sqlx::QueryBuilder::<Sqlite>::new(format!(
		"SELECT {} FROM login_configs WHERE 1=1",
		COLUMNS
	));
	if let Some(typ) = &opts.typ {
		query.push(" AND type = ").push_bind(typ.as_str());
	}
	if let Some(enabled) = opts.enabled {
		query.push(" AND enabled = ").push_bind(enabled);
	}
	query.push(" ORDER BY id");

	let rows = query.build().fetch_all(db).await.inspect_err(inspect).or(Err(Error::DbError))?;
	collect_res(rows.iter().map(map_config))
}

pub(crate) async fn read(db: &SqlitePool, id: ConfigId) -> ClResult<LoginConfig> {
	read_one(db, id).await
}

/// Insert a configuration, disabling enabled siblings of its type first
pub(crate) async fn create(db: &SqlitePool, values: &CreateLoginConfig) -> ClResult<LoginConfig> {
	let options = values.options.to_json_string()?;
	let (mut tx, now) = begin_write(db).await?;

	if values.enabled {
		let res = sqlx::query(
			"UPDATE login_configs SET enabled = 0, updated_at = ?2 WHERE type = ?1 AND enabled = 1",
		)
		.bind(&values.typ)
		.bind(now.0)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
		if res.rows_affected() > 0 {
			debug!(typ = %values.typ, disabled = res.rows_affected(), "disabled previous active config");
		}
	}

	let res = sqlx::query(
		"INSERT INTO login_configs (title, type, enabled, description, options, created_at, updated_at)
		VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
	)
	.bind(&values.title)
	.bind(&values.typ)
	.bind(values.enabled)
	.bind(values.description.as_deref())
	.bind(&options)
	.bind(now.0)
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	let config = read_one(&mut *tx, ConfigId(res.last_insert_rowid())).await?;
	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;

	Ok(config)
}

/// Apply a partial update, disabling enabled siblings of the resulting type
pub(crate) async fn update(
	db: &SqlitePool,
	id: ConfigId,
	values: &UpdateLoginConfig,
) -> ClResult<LoginConfig> {
	let options = match &values.options {
		Patch::Value(options) => Some(options.to_json_string()?),
		Patch::Null => Some("{}".to_string()),
		Patch::Undefined => None,
	};

	let (mut tx, now) = begin_write(db).await?;

	sqlx::query(
		"UPDATE login_configs SET enabled = 0, updated_at = ?4
		WHERE enabled = 1 AND id != ?1
		AND type = coalesce(?2, (SELECT type FROM login_configs WHERE id = ?1))
		AND coalesce(?3, (SELECT enabled FROM login_configs WHERE id = ?1)) = 1",
	)
	.bind(id.0)
	.bind(values.typ.value().map(String::as_str))
	.bind(values.enabled.value().copied())
	.bind(now.0)
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	let mut query = sqlx::QueryBuilder::<Sqlite>::new("UPDATE login_configs SET updated_at = ");
	query.push_bind(now.0);
	if let Patch::Value(title) = &values.title {
		query.push(", title = ").push_bind(title.as_str());
	}
	if let Patch::Value(typ) = &values.typ {
		query.push(", type = ").push_bind(typ.as_str());
	}
	if let Patch::Value(enabled) = values.enabled {
		query.push(", enabled = ").push_bind(enabled);
	}
	match &values.description {
		Patch::Value(description) => {
			query.push(", description = ").push_bind(description.as_str());
		}
		Patch::Null => {
			query.push(", description = NULL");
		}
		Patch::Undefined => {}
	}
	if let Some(options) = &options {
		query.push(", options = ").push_bind(options.as_str());
	}
	query.push(" WHERE id = ").push_bind(id.0);

	let res = query.build().execute(&mut *tx).await.inspect_err(inspect).or(Err(Error::DbError))?;
	if res.rows_affected() == 0 {
		// Dropping the transaction rolls back the sibling update
		return Err(Error::NotFound);
	}

	let config = read_one(&mut *tx, id).await?;
	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;

	Ok(config)
}

pub(crate) async fn delete(db: &SqlitePool, id: ConfigId) -> ClResult<()> {
	let res = sqlx::query("DELETE FROM login_configs WHERE id = ?1")
		.bind(id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

/// Enabled configurations, most recently updated first
pub(crate) async fn list_active(
	db: &SqlitePool,
	typ: Option<&str>,
	limit: u32,
) -> ClResult<Vec<LoginConfig>> {
	let mut query = sqlx::QueryBuilder::<Sqlite>::new(format!(
		"SELECT {} FROM login_configs WHERE enabled = 1",
		COLUMNS
	));
	if let Some(typ) = typ {
		query.push(" AND type = ").push_bind(typ);
	}
	query.push(" ORDER BY updated_at DESC, id DESC LIMIT ").push_bind(i64::from(limit));

	let rows = query.build().fetch_all(db).await.inspect_err(inspect).or(Err(Error::DbError))?;
	collect_res(rows.iter().map(map_config))
}

// vim: ts=4
