//! Default traffic mix

use serde::{Deserialize, Serialize};

use crate::error::SimulatorResult;
use crate::types::validate_ratio;

/// Ratios used when a request does not specify its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficDefaults {
    /// Fraction of requests that are reads
    pub read_ratio: f64,
    /// Fraction of reads served from cache
    pub cache_hit_ratio: f64,
}

impl Default for TrafficDefaults {
    fn default() -> Self {
        Self {
            read_ratio: 0.95,
            cache_hit_ratio: 0.8,
        }
    }
}

impl TrafficDefaults {
    pub fn validate(&self) -> SimulatorResult<()> {
        validate_ratio("traffic.read_ratio", self.read_ratio)?;
        validate_ratio("traffic.cache_hit_ratio", self.cache_hit_ratio)
    }
}
