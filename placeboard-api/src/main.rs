//! # Placeboard API Server
//!
//! REST API for the Placeboard application: user accounts and the places
//! they create, backed by PostgreSQL.
//!
//! ## Architecture
//!
//! - Place and user CRUD endpoints under `/api/`
//! - Transactional writes keeping the Place↔User reference consistent
//! - Address geocoding via the TomTom Search API
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p placeboard-api
//! ```

use placeboard_api::app::{build_router, AppState};
use placeboard_api::config::Config;
use placeboard_shared::db::migrations::run_migrations;
use placeboard_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use placeboard_shared::geocode::TomTomGeocoder;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placeboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Placeboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let geocoder = Arc::new(TomTomGeocoder::with_base_url(
        config.geocoding.api_key.clone(),
        config.geocoding.base_url.clone(),
    ));

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config, geocoder);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");
    close_pool(pool).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
