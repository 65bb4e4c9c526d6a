//! HTTP trigger for ephemeral
//!
//! The gateway exposes a home endpoint and `/ephemeralTwitter`, which runs one
//! purge pass inside the request and answers 200 once it completes. Nothing
//! about the pass outcome is reported to the caller.

use crate::config::Config;
use crate::retention::{PurgeReport, evaluate_and_purge};
use crate::twitter::ApiClient;
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::{any, get};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Path of the purge trigger
pub const TRIGGER_PATH: &str = "/ephemeralTwitter";

/// Shared, read-only state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Builds the router serving the home and trigger endpoints.
///
/// Every path other than the trigger lands on the home handler, whatever the
/// method.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(home))
        .route(TRIGGER_PATH, get(trigger).post(trigger))
        .fallback(home)
        .with_state(state)
}

async fn home(uri: Uri) -> StatusCode {
    info!("Request received at: {}", uri);
    StatusCode::OK
}

async fn trigger(State(state): State<AppState>) -> StatusCode {
    info!("Purge triggered over HTTP");
    if let Err(e) = run_purge(&state.config).await {
        debug!("Purge aborted: {:#}", e);
    }
    StatusCode::OK
}

/// Builds a client from `config` and runs one purge pass.
///
/// Returns an error only if the HTTP client cannot be created; everything that
/// goes wrong during the pass itself is logged and absorbed into the report.
pub async fn run_purge(config: &Config) -> Result<PurgeReport> {
    let client = ApiClient::new(config.credentials.clone(), config.api_base_url.clone())
        .map_err(|e| {
            error!(error = %e, "Could not create Twitter client");
            e
        })
        .context("Failed to create Twitter client")?;

    Ok(evaluate_and_purge(&client, &config.policy(), &config.whitelist).await)
}

/// Runs the HTTP server until SIGINT or SIGTERM.
pub async fn serve(config: Config) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "About to listen on {}. Go to http://127.0.0.1:{}/",
        addr,
        addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to setup SIGTERM handler: {}", e);
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, initiating graceful shutdown...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}
