//! HTTP server implementation
//!
//! Provides the Axum-based HTTP service exposing the simulation engine.

mod handlers;
mod middleware;
mod routes;
mod state;
pub mod shutdown;

pub use handlers::*;
pub use middleware::{build_cors_layer, RequestId, REQUEST_ID_HEADER};
pub use routes::*;
pub use shutdown::*;
pub use state::*;

use std::net::SocketAddr;

use axum::{middleware::from_fn, middleware::from_fn_with_state, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ScaleLabConfig;
use crate::telemetry::init_telemetry;

/// Run the ScaleLab HTTP service until SIGINT/SIGTERM
pub async fn run_server(config: ScaleLabConfig) -> anyhow::Result<()> {
    init_telemetry(&config.telemetry)?;

    let addr: SocketAddr = config.server.socket_addr()?;
    let state = AppState::new(config.clone());
    let shutdown_state = state.shutdown.clone();

    let app = create_router(state);

    info!(
        "Starting ScaleLab v{} on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );
    info!(
        load_balancer_ms = config.latency.load_balancer,
        app_server_ms = config.latency.app_server,
        database_ms = config.latency.database,
        cache_ms = config.latency.cache,
        "Base latency table"
    );
    info!(
        read_ratio = config.traffic.read_ratio,
        cache_hit_ratio = config.traffic.cache_hit_ratio,
        "Default traffic mix"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown(shutdown_state))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = build_cors_layer(&config.cors);

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout));

    let mut router = Router::new()
        .merge(routes::simulation_routes())
        .merge(routes::admin_routes())
        .merge(routes::health_routes());

    if config.server.request_logging {
        router = router.layer(from_fn(middleware::logging_middleware));
    }

    // Layers added last run first: request id, then drain tracking, then logging
    router
        .layer(from_fn_with_state(state.clone(), request_tracking_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(layers)
        .with_state(state)
}
