//! Core simulation engine
//!
//! The SimulationEngine is the heart of the simulator, responsible for:
//! - Building topologies from caller blueprints
//! - Splitting aggregate traffic across node-type groups
//! - Evaluating every node and deriving the system verdict
//! - Tracking statistics across calls

mod state;
mod topology;
mod traffic;

pub use state::*;
pub use topology::*;
pub use traffic::*;

use std::sync::Arc;
use std::time::{Duration, Instant};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::{BaseLatencyTable, ScaleLabConfig};
use crate::error::SimulatorResult;
use crate::types::*;

/// The main simulation engine
///
/// Each call rebuilds its topology from the request's blueprint; no topology
/// outlives a call, so concurrent calls never share node state.
pub struct SimulationEngine {
    config: Arc<RwLock<ScaleLabConfig>>,
    state: EngineState,
    start_time: Instant,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given configuration
    pub fn new(config: ScaleLabConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            state: EngineState::new(),
            start_time: Instant::now(),
        }
    }

    /// Create with default configuration
    pub fn default_config() -> Self {
        Self::new(ScaleLabConfig::default())
    }

    /// Get current configuration
    pub fn config(&self) -> ScaleLabConfig {
        self.config.read().clone()
    }

    /// Base latency table used for new topologies
    pub fn latency_table(&self) -> BaseLatencyTable {
        self.config.read().latency
    }

    /// Get engine uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Build a topology from `blueprint` with the configured latency table
    pub fn build_topology(&self, blueprint: &Blueprint) -> SimulatorResult<Topology> {
        blueprint.validate().map_err(|e| {
            self.state.record_invalid_request();
            e
        })?;

        Topology::build(blueprint, &self.latency_table()).map_err(|e| {
            self.state.record_rejected_blueprint();
            warn!(error = %e, nodes = blueprint.len(), "Rejected blueprint");
            e
        })
    }

    /// Run one steady-state simulation
    pub fn simulate(&self, request: &SimulateRequest) -> SimulatorResult<Report> {
        let start = Instant::now();

        let profile = request.profile(&self.config.read().traffic);
        profile.validate().map_err(|e| {
            self.state.record_invalid_request();
            e
        })?;

        let topology = self.build_topology(&request.blueprint)?;
        let report = topology.simulate(&profile);
        report.ensure_finite().map_err(|e| {
            self.state.record_invalid_request();
            e
        })?;

        debug!(
            traffic_rps = profile.traffic_rps,
            read_ratio = profile.read_ratio,
            cache_hit_ratio = profile.cache_hit_ratio,
            db_traffic = report.db_traffic,
            total_latency = report.total_latency,
            status = %report.system_status,
            "Simulation complete"
        );

        if report.system_status.is_failed() {
            let overloaded: Vec<&str> = report
                .nodes
                .iter()
                .filter(|n| n.node_type == NodeType::Database && n.status.is_overloaded())
                .map(|n| n.id.as_str())
                .collect();
            warn!(
                traffic_rps = profile.traffic_rps,
                databases = ?overloaded,
                "System failed: database tier overloaded"
            );
        }

        self.state.record_simulation(report.system_status, start.elapsed());
        Ok(report)
    }

    /// Simulate a range of traffic levels against one topology
    pub fn sweep(&self, request: &SweepRequest) -> SimulatorResult<SweepReport> {
        let start = Instant::now();

        let (profile, max_points) = {
            let config = self.config.read();
            (request.profile(&config.traffic), config.server.max_sweep_points)
        };
        let range = request.range();

        range
            .validate(max_points)
            .and_then(|_| profile.validate())
            .map_err(|e| {
                self.state.record_invalid_request();
                e
            })?;

        let topology = self.build_topology(&request.blueprint)?;
        let report = topology.sweep(&range, &profile);
        report.ensure_finite().map_err(|e| {
            self.state.record_invalid_request();
            e
        })?;

        debug!(
            start_rps = range.start_rps,
            end_rps = range.end_rps,
            points = report.points.len(),
            first_failure_rps = ?report.first_failure_rps,
            "Sweep complete"
        );

        self.state.record_sweep(start.elapsed());
        Ok(report)
    }

    /// Get engine statistics
    pub fn stats(&self) -> EngineStats {
        self.state.stats()
    }

    /// Reset engine statistics
    pub fn reset_stats(&self) {
        self.state.reset();
    }
}

impl Clone for SimulationEngine {
    fn clone(&self) -> Self {
        let config = self.config.read().clone();
        Self::new(config)
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::default_config()
    }
}
