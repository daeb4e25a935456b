//! Login configuration store: single active configuration per type
#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

#[cfg(test)]
mod tests {
	use std::collections::HashMap;
	use std::sync::Arc;

	use loginpage_core::memory_adapter::MemoryLoginConfigAdapter;
	use loginpage_core::store::LoginConfigStore;
	use loginpage_types::auth::AuthCtx;
	use loginpage_types::config_adapter::{
		CreateLoginConfig, ListLoginConfigOptions, UpdateLoginConfig,
	};
	use loginpage_types::login_config::{LoginConfig, LoginOptions};
	use loginpage_types::prelude::*;

	const TYPES: [&str; 3] = ["home", "kiosk", "partner"];

	fn create(title: &str, typ: &str, enabled: bool) -> CreateLoginConfig {
		CreateLoginConfig {
			title: title.into(),
			typ: typ.into(),
			enabled,
			description: None,
			options: LoginOptions::default(),
		}
	}

	fn admin() -> AuthCtx {
		AuthCtx { id_tag: "admin".into(), roles: Box::new(["admin".into()]) }
	}

	async fn assert_single_enabled(store: &LoginConfigStore) {
		let all = store.list(&ListLoginConfigOptions::default()).await.unwrap();
		let mut per_type: HashMap<&str, usize> = HashMap::new();
		for config in all.iter().filter(|c| c.enabled) {
			*per_type.entry(config.typ.as_str()).or_default() += 1;
		}
		for (typ, count) in per_type {
			assert!(count <= 1, "{} enabled configs of type {}", count, typ);
		}
	}

	/// Small deterministic generator so the sequence is reproducible
	struct Lcg(u64);

	impl Lcg {
		fn next(&mut self, bound: usize) -> usize {
			self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
			((self.0 >> 33) as usize) % bound
		}
	}

	#[tokio::test]
	async fn test_random_write_sequences_keep_one_enabled() {
		let store = LoginConfigStore::new(Arc::new(MemoryLoginConfigAdapter::new()));
		let mut rng = Lcg(7);
		let mut ids: Vec<ConfigId> = Vec::new();

		for step in 0..300 {
			let typ = TYPES[rng.next(TYPES.len())];
			if ids.is_empty() || rng.next(3) == 0 {
				let values = create(&format!("c{}", step), typ, rng.next(2) == 0);
				ids.push(store.create(&values).await.unwrap().id);
			} else {
				let id = ids[rng.next(ids.len())];
				let patch = UpdateLoginConfig {
					typ: if rng.next(4) == 0 { Patch::Value(typ.into()) } else { Patch::Undefined },
					enabled: match rng.next(3) {
						0 => Patch::Value(true),
						1 => Patch::Value(false),
						_ => Patch::Undefined,
					},
					..Default::default()
				};
				store.update(id, &patch).await.unwrap();
			}
			assert_single_enabled(&store).await;
		}
	}

	#[tokio::test]
	async fn test_enabled_create_becomes_active() {
		let store = LoginConfigStore::new(Arc::new(MemoryLoginConfigAdapter::new()));

		let a = store.create(&create("A", "home", true)).await.unwrap();
		let b = store.create(&create("B", "home", true)).await.unwrap();

		let active = store.get_active_config(Some("home"), None).await.unwrap().unwrap();
		assert_eq!(active.id, b.id);
		assert!(!store.read(a.id).await.unwrap().enabled);

		// Re-enabling A moves the active slot back
		let patch = UpdateLoginConfig { enabled: Patch::Value(true), ..Default::default() };
		store.update(a.id, &patch).await.unwrap();
		let active = store.get_active_config(Some("home"), None).await.unwrap().unwrap();
		assert_eq!(active.id, a.id);
		assert!(!store.read(b.id).await.unwrap().enabled);
	}

	#[tokio::test]
	async fn test_tie_break_with_injected_duplicates() {
		let adapter = Arc::new(MemoryLoginConfigAdapter::new());
		let store = LoginConfigStore::new(adapter.clone());

		let raw = |title: &str, updated_at: i64| LoginConfig {
			id: ConfigId(0),
			title: title.into(),
			typ: "home".into(),
			enabled: true,
			description: None,
			options: LoginOptions::default(),
			created_at: Timestamp(updated_at),
			updated_at: Timestamp(updated_at),
		};
		adapter.insert_raw(raw("newest", 300));
		adapter.insert_raw(raw("older", 100));
		let tied = adapter.insert_raw(raw("tied, higher id", 300));

		for _ in 0..5 {
			let active = store.get_active_config(Some("home"), None).await.unwrap().unwrap();
			assert_eq!(active.id, tied);
		}
	}

	#[tokio::test]
	async fn test_no_type_returns_most_recent_of_any_type() {
		let adapter = Arc::new(MemoryLoginConfigAdapter::new());
		let store = LoginConfigStore::new(adapter.clone());

		let raw = |typ: &str, updated_at: i64| LoginConfig {
			id: ConfigId(0),
			title: typ.into(),
			typ: typ.into(),
			enabled: true,
			description: None,
			options: LoginOptions::default(),
			created_at: Timestamp(updated_at),
			updated_at: Timestamp(updated_at),
		};
		adapter.insert_raw(raw("home", 500));
		let kiosk = adapter.insert_raw(raw("kiosk", 900));

		let active = store.get_active_config(None, Some(&admin())).await.unwrap().unwrap();
		assert_eq!(active.id, kiosk);
	}

	#[tokio::test]
	async fn test_latest_write_wins_within_the_same_instant() {
		let store = LoginConfigStore::new(Arc::new(MemoryLoginConfigAdapter::new()));

		let home = store.create(&create("Home", "home", true)).await.unwrap();
		let kiosk = store.create(&create("Kiosk", "kiosk", true)).await.unwrap();
		let patch = UpdateLoginConfig { title: Patch::Value("Home 2".into()), ..Default::default() };
		let updated = store.update(home.id, &patch).await.unwrap();
		assert!(updated.updated_at > kiosk.updated_at);

		let active = store.get_active_config(None, Some(&admin())).await.unwrap().unwrap();
		assert_eq!(active.id, home.id);
		assert_eq!(active.title, "Home 2");
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn test_concurrent_writes_keep_one_enabled() {
		let store = Arc::new(LoginConfigStore::new(Arc::new(MemoryLoginConfigAdapter::new())));
		let seed = store.create(&create("seed", "home", false)).await.unwrap();

		let mut handles = Vec::new();
		for i in 0..24 {
			let store = store.clone();
			let typ = TYPES[i % TYPES.len()];
			handles.push(tokio::spawn(async move {
				if i % 4 == 0 {
					let patch = UpdateLoginConfig { enabled: Patch::Value(true), ..Default::default() };
					store.update(seed.id, &patch).await.map(|_| ())
				} else {
					store.create(&create(&format!("c{}", i), typ, true)).await.map(|_| ())
				}
			}));
		}
		for handle in handles {
			handle.await.unwrap().unwrap();
		}

		assert_single_enabled(&store).await;
		for typ in TYPES {
			assert!(store.get_active_config(Some(typ), Some(&admin())).await.unwrap().is_some());
		}
	}

	#[tokio::test]
	async fn test_delete() {
		let store = LoginConfigStore::new(Arc::new(MemoryLoginConfigAdapter::new()));
		let a = store.create(&create("A", "home", true)).await.unwrap();

		store.delete(a.id).await.unwrap();
		assert!(matches!(store.read(a.id).await, Err(Error::NotFound)));
		assert!(matches!(store.delete(a.id).await, Err(Error::NotFound)));
		assert_eq!(store.get_active_config(Some("home"), None).await.unwrap(), None);
	}
}

// vim: ts=4
