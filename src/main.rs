use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vcrs_api::config::AppConfig;
use vcrs_api::database::PgStore;
use vcrs_api::server::{app, shutdown_signal, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vcrs_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting VCRS API in {:?} mode", config.environment);

    let store = Arc::new(
        PgStore::connect(&config.database)
            .await
            .context("failed to connect to database")?,
    );
    store.migrate().await.context("failed to run migrations")?;

    tokio::fs::create_dir_all(&config.server.upload_dir)
        .await
        .with_context(|| format!("failed to create upload dir {}", config.server.upload_dir.display()))?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config, store.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("VCRS API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}
