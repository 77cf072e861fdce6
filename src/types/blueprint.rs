//! Blueprint types: the caller's declarative description of a topology

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SimulationError, SimulatorResult};

/// Declarative node set supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub nodes: Vec<NodeSpec>,
}

/// One blueprint entry
///
/// `node_type` stays a raw string here so that an unrecognized type reaches
/// topology construction and is reported as a configuration error there,
/// rather than being rejected by the deserializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub capacity: f64,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>, capacity: f64) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            capacity,
        }
    }
}

impl Blueprint {
    pub fn new(nodes: Vec<NodeSpec>) -> Self {
        Self { nodes }
    }

    /// The five-node demo topology used by the ScaleLab UI
    pub fn reference() -> Self {
        Self::new(vec![
            NodeSpec::new("lb1", "load_balancer", 10_000.0),
            NodeSpec::new("app1", "app_server", 10_000.0),
            NodeSpec::new("app2", "app_server", 10_000.0),
            NodeSpec::new("cache1", "cache", 10_000.0),
            NodeSpec::new("db1", "database", 10_000.0),
        ])
    }

    /// Load a blueprint from a YAML, TOML, or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimulatorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Internal(format!("Failed to read blueprint file: {}", e))
        })?;

        let blueprint: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| SimulationError::invalid("blueprint", format!("YAML parse error: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| SimulationError::invalid("blueprint", format!("TOML parse error: {}", e)))?,
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| SimulationError::invalid("blueprint", format!("JSON parse error: {}", e)))?,
            _ => {
                return Err(SimulationError::invalid(
                    "blueprint",
                    "Unsupported blueprint file format. Use .yaml, .toml, or .json",
                ))
            }
        };

        Ok(blueprint)
    }

    /// Check the numeric domain of every entry.
    ///
    /// Node types are not checked here; that is construction's job.
    pub fn validate(&self) -> SimulatorResult<()> {
        for (index, node) in self.nodes.iter().enumerate() {
            if !node.capacity.is_finite() || node.capacity < 0.0 {
                return Err(SimulationError::invalid(
                    &format!("blueprint.nodes[{}].capacity", index),
                    format!(
                        "capacity of node '{}' must be a non-negative number, got {}",
                        node.id, node.capacity
                    ),
                ));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
