//! # Ember Admin Server
//!
//! Binary hosting the admin REST API: role management and photo moderation.
//! Runs alongside the identity and profile services, sharing their PostgreSQL
//! database and object-storage bucket.

use ember_api::{build_router, AppState};
use ember_db::{storage::StorageClient, Database};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ember_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ember=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting Ember admin server v{}", env!("CARGO_PKG_VERSION"));

    // Connect to the database and run migrations
    let db = Database::connect(config).await?;
    db.migrate().await?;

    // === Object Storage (MinIO / S3) ===
    let storage = StorageClient::new(&config.storage)?;
    storage.ensure_bucket().await?;
    tracing::info!("📦 Object storage ready (bucket: {})", config.storage.bucket);

    // === REST API Server ===
    let state = AppState::new(db, storage);
    let router = build_router(state);
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    tracing::info!("📡 Admin API listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
