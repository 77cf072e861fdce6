//! Graceful shutdown
//!
//! Tracks in-flight requests so the server can stop accepting work on
//! SIGINT/SIGTERM and let running simulations finish before exiting.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use super::state::AppState;
use crate::error::ErrorResponse;

/// Shutdown state for tracking in-flight requests
#[derive(Debug)]
pub struct ShutdownState {
    in_flight: AtomicU64,
    draining: AtomicBool,
    drain_timeout: Duration,
}

impl ShutdownState {
    pub fn new(drain_timeout: Duration) -> Self {
        Self {
            in_flight: AtomicU64::new(0),
            draining: AtomicBool::new(false),
            drain_timeout,
        }
    }

    /// Mark a request as started, returning the new in-flight count
    pub fn request_started(&self) -> u64 {
        self.in_flight.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Mark a request as completed, returning the new in-flight count
    pub fn request_completed(&self) -> u64 {
        self.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1)
    }

    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }

    pub fn is_ready(&self) -> bool {
        !self.is_draining()
    }

    /// Stop accepting new requests
    pub fn start_drain(&self) {
        info!("Starting graceful shutdown, marking as draining");
        self.draining.store(true, Ordering::SeqCst);
    }

    pub fn drain_timeout(&self) -> Duration {
        self.drain_timeout
    }

    /// Wait for all in-flight requests to complete or the drain timeout to pass
    pub async fn wait_for_drain(&self) {
        let drain_start = Instant::now();

        while self.in_flight_count() > 0 {
            if drain_start.elapsed() > self.drain_timeout {
                warn!(
                    remaining_requests = self.in_flight_count(),
                    "Drain timeout exceeded, forcing shutdown"
                );
                return;
            }

            info!(
                in_flight = self.in_flight_count(),
                elapsed_ms = drain_start.elapsed().as_millis() as u64,
                "Waiting for in-flight requests to complete"
            );

            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        info!("All requests drained, proceeding with shutdown");
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Request tracking middleware
///
/// Rejects new work while draining and keeps the in-flight gauge current.
pub async fn request_tracking_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, DrainError> {
    if state.shutdown.is_draining() {
        return Err(DrainError);
    }

    state.metrics.set_in_flight(state.shutdown.request_started());
    let response = next.run(request).await;
    state.metrics.set_in_flight(state.shutdown.request_completed());

    Ok(response)
}

/// Error returned when server is draining
#[derive(Debug)]
pub struct DrainError;

impl IntoResponse for DrainError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(
            "service_unavailable",
            "Server is shutting down. Please retry your request.",
        );
        (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
    }
}

/// Resolves on SIGINT or SIGTERM, then drains in-flight requests
pub async fn graceful_shutdown(shutdown: std::sync::Arc<ShutdownState>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }

    shutdown.start_drain();
    shutdown.wait_for_drain().await;
}
