//! Report types returned by the simulation API

use serde::{Deserialize, Serialize};

use super::{NodeStatus, NodeType, SystemStatus};
use crate::error::{SimulationError, SimulatorResult};

/// Aggregated result of one simulate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub system_status: SystemStatus,
    pub total_latency: f64,
    pub db_traffic: f64,
    pub nodes: Vec<NodeReport>,
}

impl Report {
    pub fn node(&self, id: &str) -> Option<&NodeReport> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn overloaded_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.status.is_overloaded()).count()
    }

    /// Reject reports whose latencies overflowed to infinity or NaN
    pub fn ensure_finite(&self) -> SimulatorResult<()> {
        if let Some(node) = self.nodes.iter().find(|n| !n.latency.is_finite()) {
            return Err(SimulationError::invalid(
                "blueprint.nodes.capacity",
                format!("latency of node '{}' is not representable; capacity is too small for the offered load", node.id),
            ));
        }
        if !self.total_latency.is_finite() {
            return Err(SimulationError::invalid(
                "blueprint.nodes.capacity",
                "total latency is not representable; capacity is too small for the offered load",
            ));
        }
        Ok(())
    }
}

/// Per-node entry in a [`Report`], rounded for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub load: f64,
    pub latency: f64,
    pub error_rate: f64,
    pub status: NodeStatus,
}

/// One traffic level in a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub traffic_rps: f64,
    pub system_status: SystemStatus,
    pub total_latency: f64,
    pub db_traffic: f64,
    pub overloaded_nodes: usize,
}

impl SweepPoint {
    pub fn from_report(traffic_rps: f64, report: &Report) -> Self {
        Self {
            traffic_rps: round_to(traffic_rps, 2),
            system_status: report.system_status,
            total_latency: report.total_latency,
            db_traffic: report.db_traffic,
            overloaded_nodes: report.overloaded_nodes(),
        }
    }
}

/// Result of evaluating a topology across a traffic range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub read_ratio: f64,
    pub cache_hit_ratio: f64,
    pub points: Vec<SweepPoint>,
    /// Lowest swept traffic level at which the system failed
    pub first_failure_rps: Option<f64>,
}

impl SweepReport {
    pub fn new(read_ratio: f64, cache_hit_ratio: f64, points: Vec<SweepPoint>) -> Self {
        let first_failure_rps = points
            .iter()
            .find(|p| p.system_status.is_failed())
            .map(|p| p.traffic_rps);

        Self {
            read_ratio,
            cache_hit_ratio,
            points,
            first_failure_rps,
        }
    }

    /// Reject sweeps where some level produced a non-finite latency
    pub fn ensure_finite(&self) -> SimulatorResult<()> {
        match self.points.iter().find(|p| !p.total_latency.is_finite()) {
            Some(point) => Err(SimulationError::invalid(
                "blueprint.nodes.capacity",
                format!("total latency at {} rps is not representable; capacity is too small for the offered load", point.traffic_rps),
            )),
            None => Ok(()),
        }
    }
}

/// Round to `places` decimals, ties to even on the exact binary value
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
