//! API types for ScaleLab
//!
//! Blueprints describe a topology, requests carry traffic parameters, and
//! reports carry the evaluated snapshot back to the caller.

mod blueprint;
mod report;
mod request;

pub use blueprint::*;
pub use report::*;
pub use request::*;

use serde::{Deserialize, Serialize};

/// Infrastructure unit kinds the engine knows how to route traffic to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    LoadBalancer,
    AppServer,
    Database,
    Cache,
}

impl NodeType {
    pub const ALL: [NodeType; 4] = [
        NodeType::LoadBalancer,
        NodeType::AppServer,
        NodeType::Database,
        NodeType::Cache,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadBalancer => "load_balancer",
            Self::AppServer => "app_server",
            Self::Database => "database",
            Self::Cache => "cache",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    // Exact match only: "Database" or "db" are not silently accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load_balancer" => Ok(Self::LoadBalancer),
            "app_server" => Ok(Self::AppServer),
            "database" => Ok(Self::Database),
            "cache" => Ok(Self::Cache),
            _ => Err(format!("Unknown node type: {}", s)),
        }
    }
}

/// Health of a single node after evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    Healthy,
    Overloaded,
}

impl NodeStatus {
    pub fn is_overloaded(&self) -> bool {
        matches!(self, Self::Overloaded)
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Overloaded => write!(f, "Overloaded"),
        }
    }
}

/// System-wide verdict for one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemStatus {
    Running,
    Failed,
}

impl SystemStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
