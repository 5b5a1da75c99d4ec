use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::auth::StaticCredentials;
use crate::config::config;
use crate::database::{DatabaseManager, Gateway};
use crate::{app, AppState};

/// Bind, serve until Ctrl-C, then close the pool
pub async fn handle(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let config = config();
    info!("Starting Planner API in {:?} mode", config.environment);

    let credentials =
        StaticCredentials::from_config(&config.security.auth).context("Failed to load API credentials")?;
    info!(
        "Basic auth enabled for: {}",
        credentials.usernames().collect::<Vec<_>>().join(", ")
    );

    let database = Arc::new(
        DatabaseManager::connect_lazy(&config.database).context("Failed to configure database pool")?,
    );
    if !database.is_connected().await {
        warn!("Database is not reachable yet; requests will fail until it is");
    }

    let state = AppState::new(database.clone(), Arc::new(credentials), &config.api);
    let router = app(state, config);

    let bind_addr = format!(
        "{}:{}",
        host.unwrap_or_else(|| config.server.host.clone()),
        port.unwrap_or(config.server.port)
    );
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!(
        "Planner API listening on http://{}{}",
        bind_addr,
        config.api.route_prefix()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
