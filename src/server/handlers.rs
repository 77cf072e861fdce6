//! HTTP request handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use super::state::AppState;
use crate::config::ScaleLabConfig;
use crate::engine::EngineStats;
use crate::error::SimulationError;
use crate::types::*;

// ============== Simulation Handlers ==============

/// POST /simulate
pub async fn simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<Report>, SimulationError> {
    let start = Instant::now();

    match state.engine.simulate(&request) {
        Ok(report) => {
            state.metrics.record_simulation(
                start.elapsed(),
                report.system_status,
                report.overloaded_nodes(),
            );
            Ok(Json(report))
        }
        Err(e) => {
            state.metrics.record_error(e.error_type());
            Err(e)
        }
    }
}

/// POST /simulate/sweep
pub async fn sweep(
    State(state): State<AppState>,
    Json(request): Json<SweepRequest>,
) -> Result<Json<SweepReport>, SimulationError> {
    let start = Instant::now();

    match state.engine.sweep(&request) {
        Ok(report) => {
            state.metrics.record_sweep(start.elapsed());
            Ok(Json(report))
        }
        Err(e) => {
            state.metrics.record_error(e.error_type());
            Err(e)
        }
    }
}

/// GET /blueprints/reference
pub async fn reference_blueprint() -> Json<Blueprint> {
    Json(Blueprint::reference())
}

// ============== Admin Handlers ==============

/// GET /admin/stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> Json<EngineStats> {
    Json(state.engine.stats())
}

/// POST /admin/stats/reset
pub async fn reset_stats(
    State(state): State<AppState>,
) -> StatusCode {
    state.engine.reset_stats();
    state.metrics.reset();
    StatusCode::NO_CONTENT
}

/// GET /admin/config
pub async fn get_config(
    State(state): State<AppState>,
) -> Json<ScaleLabConfig> {
    Json(state.engine.config())
}

// ============== Health Handlers ==============

/// GET /health
pub async fn health_check(
    State(state): State<AppState>,
) -> Json<DetailedHealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    checks.insert("engine".to_string(), check_engine(&state));

    let config_check = check_config(&state);
    if config_check.status == ComponentStatus::Fail {
        overall_status = HealthStatus::Unhealthy;
    }
    checks.insert("config".to_string(), config_check);

    if state.shutdown.is_draining() {
        overall_status = HealthStatus::Unhealthy;
        checks.insert("shutdown".to_string(), ComponentHealth {
            status: ComponentStatus::Fail,
            message: Some("Server is draining".to_string()),
            value: Some(state.shutdown.in_flight_count() as f64),
        });
    }

    Json(DetailedHealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.engine.uptime().as_secs(),
        timestamp: chrono::Utc::now(),
        checks,
    })
}

/// GET /ready
pub async fn ready_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadyResponse>) {
    if !state.shutdown.is_ready() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                ready: false,
                reason: Some("Server is draining".to_string()),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(ReadyResponse {
            ready: true,
            reason: None,
        }),
    )
}

/// GET /metrics
pub async fn metrics(
    State(state): State<AppState>,
) -> String {
    state.metrics.export()
}

fn check_engine(state: &AppState) -> ComponentHealth {
    let stats = state.engine.stats();

    ComponentHealth {
        status: ComponentStatus::Pass,
        message: Some(format!(
            "{} simulations, {} sweeps",
            stats.total_simulations, stats.total_sweeps
        )),
        value: Some(stats.total_simulations as f64),
    }
}

fn check_config(state: &AppState) -> ComponentHealth {
    match state.config.validate() {
        Ok(()) => ComponentHealth {
            status: ComponentStatus::Pass,
            message: None,
            value: None,
        },
        Err(e) => ComponentHealth {
            status: ComponentStatus::Fail,
            message: Some(e.to_string()),
            value: None,
        },
    }
}

/// Detailed health response
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub checks: HashMap<String, ComponentHealth>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Pass,
    Fail,
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// GET /version
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rust_version: env!("CARGO_PKG_RUST_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
    pub rust_version: String,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "ScaleLab Simulation API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "/simulate".to_string(),
            "/simulate/sweep".to_string(),
            "/blueprints/reference".to_string(),
            "/health".to_string(),
            "/metrics".to_string(),
        ],
    })
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}
