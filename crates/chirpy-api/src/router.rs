//! Route definitions for the Chirpy HTTP API.
//!
//! Public routes are mounted under `/api`, maintenance routes under
//! `/admin`. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(session_routes())
        .merge(chirp_routes())
        .merge(webhook_routes());

    Router::new()
        .nest("/api", api_routes)
        .nest("/admin", admin_routes())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/healthz", get(handlers::health::healthz))
}

/// Registration and credential updates
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        post(handlers::users::create_user).put(handlers::users::update_user),
    )
}

/// Login, refresh, revoke
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/revoke", post(handlers::auth::revoke))
}

fn chirp_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chirps",
            post(handlers::chirps::create_chirp).get(handlers::chirps::list_chirps),
        )
        .route(
            "/chirps/{id}",
            get(handlers::chirps::get_chirp).delete(handlers::chirps::delete_chirp),
        )
}

fn webhook_routes() -> Router<AppState> {
    Router::new().route("/polka/webhooks", post(handlers::webhook::polka_webhook))
}

/// Development-only maintenance
fn admin_routes() -> Router<AppState> {
    Router::new().route("/reset", post(handlers::admin::reset))
}
