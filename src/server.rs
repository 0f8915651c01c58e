//! HTTP server initialization and runtime setup.
//!
//! Wires the link repository and counter store chosen by [`Config`] into the
//! service layer, then runs the Axum server until shutdown.

use crate::application::services::{IdAllocator, LinkService};
use crate::config::{Config, CounterBackend};
use crate::domain::repositories::{CounterStore, LinkRepository};
use crate::infrastructure::counter::{MemoryCounterStore, PgCounterStore, RedisCounterStore};
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connects to PostgreSQL and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// Builds the counter store for the configured backend.
///
/// A Redis store that cannot be reached at startup is not fatal: the
/// allocator runs without a store and issues random identifiers.
async fn build_counter_store(
    config: &Config,
    pool: Option<&Arc<PgPool>>,
) -> Option<Arc<dyn CounterStore>> {
    match config.counter_backend {
        CounterBackend::Postgres => match pool {
            Some(pool) => Some(Arc::new(PgCounterStore::new(pool.clone()))),
            None => {
                tracing::warn!("Postgres counter requested without a database");
                None
            }
        },
        CounterBackend::Redis => {
            let url = config.redis_url.as_deref()?;
            match RedisCounterStore::connect(url).await {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Identifiers will be random.", e);
                    None
                }
            }
        }
        CounterBackend::Memory => {
            tracing::warn!("In-memory counter: identifiers restart after each process restart");
            Some(Arc::new(MemoryCounterStore::new()))
        }
        CounterBackend::None => None,
    }
}

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if a configured database cannot be reached or migrated.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let pool = match config.database_url.as_deref() {
        Some(url) => Some(Arc::new(connect_database(config, url).await?)),
        None => None,
    };

    let link_repository: Arc<dyn LinkRepository> = match &pool {
        Some(pool) => Arc::new(PgLinkRepository::new(pool.clone())),
        None => {
            tracing::warn!("No database configured; links are kept in memory");
            Arc::new(MemoryLinkRepository::new())
        }
    };

    let allocator = match build_counter_store(config, pool.as_ref()).await {
        Some(store) => {
            tracing::info!(backend = %config.counter_backend, key = %config.counter_key, "Counter store ready");
            IdAllocator::new(store, config.counter_key.clone())
        }
        None => {
            tracing::warn!("No counter store; identifiers are not guaranteed unique");
            IdAllocator::without_store()
        }
    };

    let link_service = Arc::new(LinkService::new(link_repository, allocator));

    Ok(AppState::new(link_service, config.default_actor.as_str()))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
