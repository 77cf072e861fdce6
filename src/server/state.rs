//! Server state management

use std::sync::Arc;
use crate::config::ScaleLabConfig;
use crate::engine::SimulationEngine;
use crate::telemetry::SimulatorMetrics;
use super::shutdown::ShutdownState;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SimulationEngine>,
    pub metrics: Arc<SimulatorMetrics>,
    pub config: Arc<ScaleLabConfig>,
    pub shutdown: Arc<ShutdownState>,
}

impl AppState {
    pub fn new(config: ScaleLabConfig) -> Self {
        Self {
            engine: Arc::new(SimulationEngine::new(config.clone())),
            metrics: Arc::new(SimulatorMetrics::new()),
            shutdown: Arc::new(ShutdownState::new(config.server.request_timeout)),
            config: Arc::new(config),
        }
    }
}
