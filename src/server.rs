//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, migrations, and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::persistence::{MemoryUrlStore, PgUrlStore};
use crate::routes::app_router;
use crate::state::{AppState, Credentials};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The URL store (PostgreSQL with migrations, or in-memory)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let shutdown = CancellationToken::new();
    let state = AppState::new(
        store,
        config.assignment_policy(),
        Credentials::new(config.auth_user.clone(), config.auth_password.clone()),
        shutdown.clone(),
        config.request_timeout(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    tokio::spawn(watch_signals(shutdown.clone()));

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Builds the store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the database is configured but unreachable, or if
/// migrations fail.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn UrlStore>> {
    let Some(ref database_url) = config.database_url else {
        tracing::warn!("No database configured, links are kept in memory");
        return Ok(Arc::new(MemoryUrlStore::new()));
    };

    let pool = connect_pool(database_url, config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(Arc::new(PgUrlStore::new(Arc::new(pool))))
}

async fn connect_pool(database_url: &str, config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    Ok(pool)
}

/// Cancels `shutdown` on Ctrl-C or SIGTERM.
async fn watch_signals(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
