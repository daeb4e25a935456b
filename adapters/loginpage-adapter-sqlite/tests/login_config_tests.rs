//! Integration tests for the SQLite login configuration adapter
#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use serde_json::json;
	use tempfile::TempDir;

	use loginpage_adapter_sqlite::LoginConfigAdapterSqlite;
	use loginpage_types::config_adapter::{
		CreateLoginConfig, ListLoginConfigOptions, LoginConfigAdapter, UpdateLoginConfig,
	};
	use loginpage_types::login_config::LoginOptions;
	use loginpage_types::prelude::*;

	/// Helper to create a test adapter with temporary database
	async fn create_test_adapter() -> ClResult<(LoginConfigAdapterSqlite, TempDir)> {
		let tmp_dir = TempDir::new().unwrap();
		let db_path = tmp_dir.path().join("login.db");
		let adapter = LoginConfigAdapterSqlite::new(db_path).await?;
		Ok((adapter, tmp_dir))
	}

	fn create(title: &str, typ: &str, enabled: bool) -> CreateLoginConfig {
		CreateLoginConfig {
			title: title.into(),
			typ: typ.into(),
			enabled,
			description: None,
			options: LoginOptions::default(),
		}
	}

	async fn enabled_ids(adapter: &LoginConfigAdapterSqlite, typ: &str) -> Vec<ConfigId> {
		let opts = ListLoginConfigOptions { typ: Some(typ.into()), enabled: Some(true) };
		adapter
			.list_login_configs(&opts)
			.await
			.unwrap()
			.into_iter()
			.map(|c| c.id)
			.collect()
	}

	#[tokio::test]
	async fn test_create_and_read() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		let mut values = create("Main", "home", true);
		values.description = Some("first".into());
		let created = adapter.create_login_config(&values).await.unwrap();
		assert_eq!(created.title, "Main");
		assert_eq!(created.typ, "home");
		assert!(created.enabled);
		assert_eq!(created.created_at, created.updated_at);

		let read = adapter.read_login_config(created.id).await.unwrap();
		assert_eq!(read, created);
	}

	#[tokio::test]
	async fn test_create_keeps_single_enabled_per_type() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let a = adapter.create_login_config(&create("A", "home", true)).await.unwrap();
		let kiosk = adapter.create_login_config(&create("K", "kiosk", true)).await.unwrap();
		let b = adapter.create_login_config(&create("B", "home", true)).await.unwrap();

		assert_eq!(enabled_ids(&adapter, "home").await, vec![b.id]);
		assert_eq!(enabled_ids(&adapter, "kiosk").await, vec![kiosk.id]);
		assert!(!adapter.read_login_config(a.id).await.unwrap().enabled);

		// A disabled insert leaves the active one alone
		adapter.create_login_config(&create("C", "home", false)).await.unwrap();
		assert_eq!(enabled_ids(&adapter, "home").await, vec![b.id]);
	}

	#[tokio::test]
	async fn test_update_enables_and_disables_siblings() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let a = adapter.create_login_config(&create("A", "home", true)).await.unwrap();
		let b = adapter.create_login_config(&create("B", "home", false)).await.unwrap();

		let patch = UpdateLoginConfig { enabled: Patch::Value(true), ..Default::default() };
		let updated = adapter.update_login_config(b.id, &patch).await.unwrap();
		assert!(updated.enabled);
		assert_eq!(enabled_ids(&adapter, "home").await, vec![b.id]);

		// Editing the enabled row without touching the flag keeps it the only one
		let patch = UpdateLoginConfig { title: Patch::Value("B2".into()), ..Default::default() };
		adapter.update_login_config(b.id, &patch).await.unwrap();
		assert_eq!(enabled_ids(&adapter, "home").await, vec![b.id]);
		assert!(!adapter.read_login_config(a.id).await.unwrap().enabled);
	}

	#[tokio::test]
	async fn test_moving_enabled_row_to_another_type() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let home = adapter.create_login_config(&create("H", "home", true)).await.unwrap();
		let kiosk = adapter.create_login_config(&create("K", "kiosk", true)).await.unwrap();

		let patch = UpdateLoginConfig { typ: Patch::Value("kiosk".into()), ..Default::default() };
		let moved = adapter.update_login_config(home.id, &patch).await.unwrap();
		assert_eq!(moved.typ, "kiosk");
		assert!(moved.enabled);

		assert_eq!(enabled_ids(&adapter, "kiosk").await, vec![home.id]);
		assert!(!adapter.read_login_config(kiosk.id).await.unwrap().enabled);
		assert!(enabled_ids(&adapter, "home").await.is_empty());
	}

	#[tokio::test]
	async fn test_update_missing_row_changes_nothing() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let a = adapter.create_login_config(&create("A", "home", true)).await.unwrap();
		let patch = UpdateLoginConfig {
			typ: Patch::Value("home".into()),
			enabled: Patch::Value(true),
			..Default::default()
		};
		let res = adapter.update_login_config(ConfigId(9999), &patch).await;
		assert!(matches!(res, Err(Error::NotFound)));
		assert_eq!(enabled_ids(&adapter, "home").await, vec![a.id]);
	}

	#[tokio::test]
	async fn test_options_round_trip() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let document = json!({
			"leftContentType": "url",
			"leftUrl": "https://example.com/embed",
			"leftImage": "https://img.example.com/kept.png",
			"themeColor": "#336699",
			"themeOpacity": 0.35,
			"loginMethods": ["password"],
			"icp": "ICP 123",
			"someFutureKey": { "a": [1, 2] }
		});
		let mut values = create("Main", "home", true);
		values.options = LoginOptions::from_value(document.clone());

		let created = adapter.create_login_config(&values).await.unwrap();
		let read = adapter.read_login_config(created.id).await.unwrap();
		assert_eq!(serde_json::to_value(&read.options).unwrap(), document);
	}

	#[tokio::test]
	async fn test_options_round_trip_keeps_operator_input() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let document = json!({
			"themeColor": "#123456",
			"themeOpacity": 1,
			"loginMethods": ["sms", "password", "sms"],
			"useSystemName": "true"
		});
		let mut values = create("Main", "home", true);
		values.options = LoginOptions::from_value(document.clone());

		let created = adapter.create_login_config(&values).await.unwrap();
		let read = adapter.read_login_config(created.id).await.unwrap();
		assert_eq!(serde_json::to_value(&read.options).unwrap(), document);
		assert_eq!(read.options.theme_color.as_deref(), Some("#123456"));
	}

	#[tokio::test]
	async fn test_update_options_patch() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let mut values = create("Main", "home", true);
		values.options.theme_color = Some("#fff".into());
		values.description = Some("desc".into());
		let created = adapter.create_login_config(&values).await.unwrap();

		// Untouched options survive a title change
		let patch = UpdateLoginConfig { title: Patch::Value("Renamed".into()), ..Default::default() };
		let updated = adapter.update_login_config(created.id, &patch).await.unwrap();
		assert_eq!(updated.options.theme_color.as_deref(), Some("#fff"));
		assert_eq!(updated.description.as_deref(), Some("desc"));

		let patch = UpdateLoginConfig {
			options: Patch::Null,
			description: Patch::Null,
			..Default::default()
		};
		let updated = adapter.update_login_config(created.id, &patch).await.unwrap();
		assert_eq!(updated.options, LoginOptions::default());
		assert_eq!(updated.description, None);
	}

	#[tokio::test]
	async fn test_delete() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let a = adapter.create_login_config(&create("A", "home", true)).await.unwrap();
		adapter.delete_login_config(a.id).await.unwrap();
		assert!(matches!(adapter.read_login_config(a.id).await, Err(Error::NotFound)));
		assert!(matches!(adapter.delete_login_config(a.id).await, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_list_filters() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		adapter.create_login_config(&create("A", "home", true)).await.unwrap();
		adapter.create_login_config(&create("B", "home", false)).await.unwrap();
		adapter.create_login_config(&create("K", "kiosk", true)).await.unwrap();

		let all = adapter.list_login_configs(&ListLoginConfigOptions::default()).await.unwrap();
		assert_eq!(all.len(), 3);
		assert!(all.windows(2).all(|w| w[0].id < w[1].id));

		let home = ListLoginConfigOptions { typ: Some("home".into()), enabled: None };
		assert_eq!(adapter.list_login_configs(&home).await.unwrap().len(), 2);

		let disabled = ListLoginConfigOptions { typ: None, enabled: Some(false) };
		let disabled = adapter.list_login_configs(&disabled).await.unwrap();
		assert_eq!(disabled.len(), 1);
		assert_eq!(disabled[0].title, "B");
	}

	#[tokio::test]
	async fn test_list_active_across_types() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		adapter.create_login_config(&create("H", "home", true)).await.unwrap();
		let k = adapter.create_login_config(&create("K", "kiosk", true)).await.unwrap();

		let active = adapter.list_active_login_configs(None, 1).await.unwrap();
		assert_eq!(active.len(), 1);
		assert_eq!(active[0].id, k.id);
		assert!(adapter.list_active_login_configs(Some("none"), 2).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_back_to_back_writes_get_increasing_timestamps() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();

		let h = adapter.create_login_config(&create("H", "home", true)).await.unwrap();
		let k = adapter.create_login_config(&create("K", "kiosk", true)).await.unwrap();
		assert!(k.updated_at > h.updated_at);

		let patch = UpdateLoginConfig { title: Patch::Value("H2".into()), ..Default::default() };
		let updated = adapter.update_login_config(h.id, &patch).await.unwrap();
		assert!(updated.updated_at > k.updated_at);

		let active = adapter.list_active_login_configs(None, 1).await.unwrap();
		assert_eq!(active[0].id, h.id);
		assert_eq!(active[0].title, "H2");
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_creates_leave_one_enabled() {
		let (adapter, _tmp) = create_test_adapter().await.unwrap();
		let adapter = Arc::new(adapter);

		let mut handles = Vec::new();
		for i in 0..16 {
			let adapter = adapter.clone();
			handles.push(tokio::spawn(async move {
				let values = create(&format!("C{}", i), "home", true);
				adapter.create_login_config(&values).await
			}));
		}
		for handle in handles {
			handle.await.unwrap().unwrap();
		}

		assert_eq!(enabled_ids(&adapter, "home").await.len(), 1);
	}
}

// vim: ts=4
