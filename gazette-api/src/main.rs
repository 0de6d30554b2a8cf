//! # Gazette API Server
//!
//! A demonstration REST API (users + articles) over a document store:
//! open registration, HTTP Basic authentication, and owner-scoped article
//! mutation.
//!
//! ## Startup sequence
//!
//! Configuration → database create-if-absent → pool → migrations → view
//! sync → listen. View sync runs single-threaded before the listener is
//! bound; if it fails the process does not start, so stale index
//! definitions can never serve traffic.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/gazette cargo run -p gazette-api
//! ```

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gazette_api::{
    app::{build_router, AppState},
    config::Config,
};
use gazette_shared::db::{
    migrations::{ensure_database_exists, run_migrations},
    pool::{create_pool, DatabaseConfig},
};
use gazette_shared::store::{DocumentStore, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gazette_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Gazette API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    // Views must be in sync before the first request is accepted.
    let store: Arc<dyn DocumentStore> = Arc::new(PgStore::new(pool));
    store.sync_views().await?;

    let bind_address = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    } else {
        tracing::info!("Shutdown signal received, draining connections...");
    }
}
