use std::{env, path, process::ExitCode, sync::Arc, time::Duration};

use loginpage::AppBuilder;
use loginpage_adapter_sqlite::LoginConfigAdapterSqlite;

pub struct Config {
	pub db_dir: path::PathBuf,
	pub listen: String,
	pub jwt_secret: String,
	pub system_title: String,
	pub preview_debounce: Duration,
}

impl Config {
	fn from_env() -> Result<Self, String> {
		let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;
		let preview_debounce = match env::var("PREVIEW_DEBOUNCE_MS") {
			Ok(ms) => Duration::from_millis(
				ms.parse().map_err(|_| format!("invalid PREVIEW_DEBOUNCE_MS: {}", ms))?,
			),
			Err(_) => loginpage::app::DEFAULT_PREVIEW_DEBOUNCE,
		};

		Ok(Config {
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			jwt_secret,
			system_title: env::var("SYSTEM_TITLE").unwrap_or_else(|_| "Sign in".to_string()),
			preview_debounce,
		})
	}
}

#[tokio::main]
async fn main() -> ExitCode {
	let config = match Config::from_env() {
		Ok(config) => config,
		Err(msg) => {
			eprintln!("FATAL: {}", msg);
			return ExitCode::FAILURE;
		}
	};

	let adapter = match LoginConfigAdapterSqlite::new(config.db_dir.join("login.db")).await {
		Ok(adapter) => adapter,
		Err(err) => {
			eprintln!("FATAL: cannot open database: {}", err);
			return ExitCode::FAILURE;
		}
	};

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.jwt_secret(config.jwt_secret)
		.system_title(config.system_title)
		.preview_debounce(config.preview_debounce)
		.login_config_adapter(Arc::new(adapter));

	match builder.run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("FATAL: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
