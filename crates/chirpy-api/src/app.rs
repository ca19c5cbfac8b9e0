//! Application builder and server entry point.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;
use chirpy_core::traits::SystemClock;
use chirpy_database::Repositories;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Chirpy HTTP server until Ctrl-C.
pub async fn run_server(config: AppConfig, repositories: Repositories) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let platform = config.server.platform;

    let state = AppState::new(config, repositories, Arc::new(SystemClock))?;
    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, platform = %platform, "Chirpy server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chirpy server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
