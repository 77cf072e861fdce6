//! Per-type base latency table

use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, SimulatorResult};
use crate::types::NodeType;

/// Latency floor in ms for each node type, applied at topology construction
///
/// The table is plain data handed to [`Topology::build`](crate::engine::Topology::build),
/// so tests and deployments can override individual entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseLatencyTable {
    pub load_balancer: f64,
    pub app_server: f64,
    pub database: f64,
    pub cache: f64,
}

impl Default for BaseLatencyTable {
    fn default() -> Self {
        Self {
            load_balancer: 5.0,
            app_server: 10.0,
            database: 20.0,
            cache: 2.0,
        }
    }
}

impl BaseLatencyTable {
    /// Base latency for `node_type`
    pub fn get(&self, node_type: NodeType) -> f64 {
        match node_type {
            NodeType::LoadBalancer => self.load_balancer,
            NodeType::AppServer => self.app_server,
            NodeType::Database => self.database,
            NodeType::Cache => self.cache,
        }
    }

    /// Return a copy with one entry replaced
    pub fn with(mut self, node_type: NodeType, latency_ms: f64) -> Self {
        match node_type {
            NodeType::LoadBalancer => self.load_balancer = latency_ms,
            NodeType::AppServer => self.app_server = latency_ms,
            NodeType::Database => self.database = latency_ms,
            NodeType::Cache => self.cache = latency_ms,
        }
        self
    }

    pub fn validate(&self) -> SimulatorResult<()> {
        for node_type in NodeType::ALL {
            let value = self.get(node_type);
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::Validation {
                    message: format!(
                        "base latency for {} must be a non-negative number, got {}",
                        node_type, value
                    ),
                    param: Some(format!("latency.{}", node_type)),
                });
            }
        }
        Ok(())
    }
}
