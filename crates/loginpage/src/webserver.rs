//! HTTP server

use axum::Router;

use crate::prelude::*;

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("Cannot listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
	info!("Shutting down");
}

pub async fn serve(listen: &str, router: Router) -> ClResult<()> {
	let listener = tokio::net::TcpListener::bind(listen).await.map_err(|err| {
		error!("FATAL: Cannot listen on {}: {}", listen, err);
		Error::ConfigError(format!("cannot listen on {}", listen))
	})?;

	info!("Listening on HTTP {}", listen);
	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

// vim: ts=4
