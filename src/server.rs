//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::application::services::AllocationSettings;
use crate::domain::completion::CompletionClient;
use crate::infrastructure::llm::{OpenRouterClient, OpenRouterSettings};
use crate::infrastructure::persistence::PgShortUrlRepository;
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
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

const CONNECT_RETRIES: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (retried with exponential backoff)
/// - Apply migrations
/// - Shortener and triage services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let repository = Arc::new(PgShortUrlRepository::new(Arc::new(pool)));
    let completion = completion_client(&config)?;

    let state = AppState::new(repository, allocation_settings(&config), completion);
    if !state.triage.is_configured() {
        tracing::warn!("OPENROUTER_API_KEY not set, CI log analysis disabled");
    }

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
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

/// Builds the pool from config, retrying the first connection.
///
/// # Errors
///
/// Returns the last connection error once the retries are used up.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_RETRIES);

    let pool = Retry::spawn(strategy, || async move {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(&config.database_url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Database connection failed, retrying"))
    })
    .await
    .context("Failed to connect to database")?;

    Ok(pool)
}

pub fn allocation_settings(config: &Config) -> AllocationSettings {
    AllocationSettings {
        code_length: config.code_length,
        max_attempts: config.max_allocation_attempts,
        base_url: config.base_url.clone(),
    }
}

fn completion_client(config: &Config) -> Result<Option<Arc<dyn CompletionClient>>> {
    let Some(api_key) = config.openrouter_api_key.clone() else {
        return Ok(None);
    };

    let client = OpenRouterClient::new(OpenRouterSettings {
        api_key,
        model: config.openrouter_model.clone(),
        base_url: config.openrouter_base_url.clone(),
        timeout: Duration::from_secs(config.llm_timeout_seconds),
    })
    .context("Failed to build completion client")?;
    tracing::info!(model = client.model(), "CI log analysis enabled");

    Ok(Some(Arc::new(client)))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
