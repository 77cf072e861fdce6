//! Topology construction and evaluation

use serde::Serialize;

use super::traffic::TrafficSplit;
use crate::config::BaseLatencyTable;
use crate::error::{SimulationError, SimulatorResult};
use crate::node::{NodeDefinition, NodeSnapshot};
use crate::types::*;

/// Ordered, immutable set of node definitions built from a blueprint
#[derive(Debug, Clone, Serialize)]
pub struct Topology {
    nodes: Vec<NodeDefinition>,
    app_servers: usize,
    databases: usize,
}

/// Unrounded outcome of evaluating a topology once
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub split: TrafficSplit,
    pub snapshots: Vec<NodeSnapshot>,
    pub system_status: SystemStatus,
}

impl Evaluation {
    /// Additive latency across every node, not an end-to-end path latency
    pub fn total_latency(&self) -> f64 {
        self.snapshots.iter().map(|s| s.latency).sum()
    }

    pub fn into_report(self) -> Report {
        Report {
            system_status: self.system_status,
            total_latency: round_to(self.total_latency(), 2),
            db_traffic: round_to(self.split.db_traffic, 2),
            nodes: self.snapshots.iter().map(NodeSnapshot::to_report).collect(),
        }
    }
}

impl Topology {
    /// Build a topology, resolving each entry's base latency from `latency`.
    ///
    /// Fails on the first unrecognized node type; no partial topology is
    /// returned.
    pub fn build(blueprint: &Blueprint, latency: &BaseLatencyTable) -> SimulatorResult<Self> {
        let nodes = blueprint
            .nodes
            .iter()
            .map(|spec| {
                let node_type: NodeType = spec.node_type.parse().map_err(|_| {
                    SimulationError::UnknownNodeType {
                        id: spec.id.clone(),
                        node_type: spec.node_type.clone(),
                    }
                })?;
                Ok(NodeDefinition::new(
                    spec.id.clone(),
                    node_type,
                    spec.capacity,
                    latency.get(node_type),
                ))
            })
            .collect::<SimulatorResult<Vec<_>>>()?;

        Ok(Self::from_definitions(nodes))
    }

    pub fn from_definitions(nodes: Vec<NodeDefinition>) -> Self {
        let count = |t: NodeType| nodes.iter().filter(|n| n.node_type == t).count();
        let app_servers = count(NodeType::AppServer);
        let databases = count(NodeType::Database);

        Self {
            nodes,
            app_servers,
            databases,
        }
    }

    pub fn nodes(&self) -> &[NodeDefinition] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes of the given type
    pub fn count(&self, node_type: NodeType) -> usize {
        match node_type {
            NodeType::AppServer => self.app_servers,
            NodeType::Database => self.databases,
            _ => self.nodes.iter().filter(|n| n.node_type == node_type).count(),
        }
    }

    /// Rate routed to one node of `node_type` under `split`
    fn route(&self, node_type: NodeType, split: &TrafficSplit) -> f64 {
        match node_type {
            NodeType::LoadBalancer => split.per_load_balancer(),
            NodeType::AppServer => split.per_app_server(self.app_servers).unwrap_or_default(),
            NodeType::Cache => split.per_cache(),
            NodeType::Database => split.per_database(self.databases).unwrap_or_default(),
        }
    }

    /// Evaluate every node at `profile` without rounding
    pub fn evaluate(&self, profile: &TrafficProfile) -> Evaluation {
        let split = TrafficSplit::compute(profile);

        let snapshots: Vec<NodeSnapshot> = self
            .nodes
            .iter()
            .map(|node| node.evaluate(self.route(node.node_type, &split)))
            .collect();

        // Only the database tier is on the critical path.
        let db_overloaded = snapshots
            .iter()
            .any(|s| s.node_type == NodeType::Database && s.status.is_overloaded());

        Evaluation {
            split,
            snapshots,
            system_status: if db_overloaded {
                SystemStatus::Failed
            } else {
                SystemStatus::Running
            },
        }
    }

    /// Steady-state report for `profile`
    pub fn simulate(&self, profile: &TrafficProfile) -> Report {
        self.evaluate(profile).into_report()
    }

    /// Simulate every traffic level in `range` with the mix from `profile`
    pub fn sweep(&self, range: &SweepRange, profile: &TrafficProfile) -> SweepReport {
        let points = range
            .levels()
            .map(|rps| {
                let report = self.simulate(&profile.with_traffic(rps));
                SweepPoint::from_report(rps, &report)
            })
            .collect();

        SweepReport::new(profile.read_ratio, profile.cache_hit_ratio, points)
    }
}
