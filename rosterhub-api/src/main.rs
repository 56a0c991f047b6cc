//! # Rosterhub API Server
//!
//! REST backend for user-record management: create, list, update, and delete
//! user records, each assigned to a randomly selected active manager.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/rosterhub cargo run -p rosterhub-api
//! ```

use rosterhub_api::{
    app::{build_router, AppState},
    config::Config,
};
use rosterhub_shared::db::{
    migrations::{get_migration_status, run_migrations},
    pool::{create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rosterhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Rosterhub API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // The initial store connection is the one process-fatal failure
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let migrations = get_migration_status(&pool).await?;
    tracing::info!(
        applied = migrations.applied_migrations,
        latest = ?migrations.latest_version,
        "migration status"
    );

    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received, exiting...");
    }
}
