mod config;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use huddle_api::AppStateInner;
use huddle_store::Store;

use crate::config::{Config, LogBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "huddle_server=debug,huddle_api=debug,huddle_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    let store = match config.backend {
        LogBackend::Json => Store::open_json(&config.data_file)?,
        LogBackend::Sqlite => Store::open_sqlite(&config.data_file)?,
    };

    // An unreadable log at startup is fatal.
    store.preload()?;

    let app = huddle_api::router(Arc::new(AppStateInner { store }))
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!(
        "Huddle listening on {} ({:?} log at {})",
        addr,
        config.backend,
        config.data_file.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Huddle stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
