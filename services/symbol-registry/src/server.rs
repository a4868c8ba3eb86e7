//! HTTP server wiring

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use services_common::ServiceConfig;
use std::{sync::Arc, time::Duration, time::Instant};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::handlers::{get_symbol, health_check, list_symbols, symbol_exists};
use crate::repository::SymbolRepository;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn SymbolRepository>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(repository: Arc<dyn SymbolRepository>) -> Self {
        Self {
            repository,
            start_time: Instant::now(),
        }
    }
}

/// Build the router with all routes and middleware
pub fn create_router(repository: Arc<dyn SymbolRepository>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/symbols", get(list_symbols))
        .route("/api/v1/symbols/:ticker", get(get_symbol))
        .route("/api/v1/symbols/:ticker/exists", get(symbol_exists))
        .with_state(AppState::new(repository))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address; hostnames are resolved
pub async fn bind(config: &ServiceConfig) -> Result<TcpListener> {
    let address = config.server_address();
    let listener = TcpListener::bind(address.as_str())
        .await
        .with_context(|| format!("Failed to bind to address {address}"))?;
    Ok(listener)
}

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &ServiceConfig, repository: Arc<dyn SymbolRepository>) -> Result<()> {
    let listener = bind(config).await?;
    let app = create_router(
        repository,
        Duration::from_secs(config.server.request_timeout_secs),
    );
    info!("Symbol registry listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Symbol registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
