//! Node model
//!
//! Converts an incoming request rate into latency, error rate, and health for
//! a single capacity-bounded unit. Below saturation latency follows a
//! single-server queueing curve, `base / (1 - utilization)`; at or above
//! saturation it grows linearly with the overshoot and the excess traffic is
//! counted as errors.

use serde::{Deserialize, Serialize};

use crate::types::{round_to, NodeReport, NodeStatus, NodeType};

/// Latency reported for a node with no capacity at all
pub const SATURATION_LATENCY_MS: f64 = 9999.0;

/// Latency multiplier applied per unit of utilization once a node saturates
pub const OVERLOAD_PENALTY: f64 = 5.0;

/// Static definition of one infrastructure unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub id: String,
    pub node_type: NodeType,
    /// Requests per second served without saturating
    pub capacity: f64,
    /// Latency in ms at zero utilization
    pub base_latency: f64,
}

impl NodeDefinition {
    pub fn new(id: impl Into<String>, node_type: NodeType, capacity: f64, base_latency: f64) -> Self {
        Self {
            id: id.into(),
            node_type,
            capacity,
            base_latency,
        }
    }

    /// Evaluate this node at the given rate
    pub fn evaluate(&self, incoming_rps: f64) -> NodeSnapshot {
        evaluate(self, incoming_rps)
    }
}

/// State of one node at a given load, unrounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub node_type: NodeType,
    pub load: f64,
    pub latency: f64,
    pub error_rate: f64,
    pub status: NodeStatus,
}

impl NodeSnapshot {
    /// Rounded view for reports: load and latency to 2 places, error rate to 3.
    pub fn to_report(&self) -> NodeReport {
        NodeReport {
            id: self.id.clone(),
            node_type: self.node_type,
            load: round_to(self.load, 2),
            latency: round_to(self.latency, 2),
            error_rate: round_to(self.error_rate, 3),
            status: self.status,
        }
    }
}

/// Evaluate `node` at `incoming_rps`.
///
/// `incoming_rps` must be non-negative and finite. A zero-capacity node is
/// fully failed regardless of load.
pub fn evaluate(node: &NodeDefinition, incoming_rps: f64) -> NodeSnapshot {
    let (latency, error_rate, status) = if node.capacity == 0.0 {
        (SATURATION_LATENCY_MS, 1.0, NodeStatus::Overloaded)
    } else {
        let utilization = incoming_rps / node.capacity;

        if utilization < 1.0 {
            (node.base_latency / (1.0 - utilization), 0.0, NodeStatus::Healthy)
        } else {
            // incoming_rps >= capacity > 0 here, so the division is safe.
            let excess = ((incoming_rps - node.capacity) / incoming_rps).min(1.0);
            (
                node.base_latency * utilization * OVERLOAD_PENALTY,
                excess,
                NodeStatus::Overloaded,
            )
        }
    };

    NodeSnapshot {
        id: node.id.clone(),
        node_type: node.node_type,
        load: incoming_rps,
        latency,
        error_rate,
        status,
    }
}
