//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::state::AppState;

/// Simulation API routes
pub fn simulation_routes() -> Router<AppState> {
    Router::new()
        .route("/simulate", post(handlers::simulate))
        .route("/simulate/sweep", post(handlers::sweep))
        .route("/blueprints/reference", get(handlers::reference_blueprint))
}

/// Admin and configuration routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(handlers::get_stats))
        .route("/admin/stats/reset", post(handlers::reset_stats))
        .route("/admin/config", get(handlers::get_config))
}

/// Health and metrics routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/healthz", get(handlers::health_check))
        .route("/ready", get(handlers::ready_check))
        .route("/readyz", get(handlers::ready_check))
        // Prometheus text format
        .route("/metrics", get(handlers::metrics))
        .route("/version", get(handlers::version))
        .route("/", get(handlers::root))
}
