use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use nzwalks_core::region::Region;
use nzwalks_core::walk::Walk;
use nzwalks_db::repositories::{MemoryStore, RegionRepo, Repository, WalkRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nzwalks_api::config::ServerConfig;
use nzwalks_api::router::build_app_router;
use nzwalks_api::state::AppState;
use nzwalks_api::storage::LocalObjectStore;

type Stores = (Arc<dyn Repository<Region>>, Arc<dyn Repository<Walk>>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nzwalks_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let (regions, walks) = connect_stores(&config).await?;
    let images = Arc::new(LocalObjectStore::new(
        config.images_dir.clone(),
        config.public_base_url.clone(),
    ));

    // --- App state ---
    let state = AppState::new(config.clone(), regions, walks, images)
        .context("Failed to build DTO mappers")?;

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// PostgreSQL repositories when `DATABASE_URL` is set, otherwise the
/// seeded in-memory store.
async fn connect_stores(config: &ServerConfig) -> anyhow::Result<Stores> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using the in-memory store");
        let store = Arc::new(MemoryStore::seeded());
        let regions: Arc<dyn Repository<Region>> = store.clone();
        let walks: Arc<dyn Repository<Walk>> = store;
        return Ok((regions, walks));
    };

    let pool = nzwalks_db::create_pool(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    nzwalks_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    nzwalks_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let regions: Arc<dyn Repository<Region>> = Arc::new(RegionRepo::new(pool.clone()));
    let walks: Arc<dyn Repository<Walk>> = Arc::new(WalkRepo::new(pool));
    Ok((regions, walks))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
