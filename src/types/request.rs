//! Request types for the simulation API

use serde::{Deserialize, Serialize};

use super::Blueprint;
use crate::config::TrafficDefaults;
use crate::error::{SimulationError, SimulatorResult};

/// POST /simulate body
///
/// Ratios are optional; omitted values fall back to the configured
/// [`TrafficDefaults`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub traffic_rps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_hit_ratio: Option<f64>,
    pub blueprint: Blueprint,
}

impl SimulateRequest {
    pub fn new(traffic_rps: f64, blueprint: Blueprint) -> Self {
        Self {
            traffic_rps,
            read_ratio: None,
            cache_hit_ratio: None,
            blueprint,
        }
    }

    pub fn with_ratios(mut self, read_ratio: f64, cache_hit_ratio: f64) -> Self {
        self.read_ratio = Some(read_ratio);
        self.cache_hit_ratio = Some(cache_hit_ratio);
        self
    }

    /// Resolve the traffic parameters against the configured defaults
    pub fn profile(&self, defaults: &TrafficDefaults) -> TrafficProfile {
        TrafficProfile {
            traffic_rps: self.traffic_rps,
            read_ratio: self.read_ratio.unwrap_or(defaults.read_ratio),
            cache_hit_ratio: self.cache_hit_ratio.unwrap_or(defaults.cache_hit_ratio),
        }
    }
}

/// POST /simulate/sweep body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    pub start_rps: f64,
    pub end_rps: f64,
    pub step_rps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_hit_ratio: Option<f64>,
    pub blueprint: Blueprint,
}

impl SweepRequest {
    pub fn range(&self) -> SweepRange {
        SweepRange {
            start_rps: self.start_rps,
            end_rps: self.end_rps,
            step_rps: self.step_rps,
        }
    }

    /// Traffic parameters for the sweep; `traffic_rps` is the start of the range.
    pub fn profile(&self, defaults: &TrafficDefaults) -> TrafficProfile {
        TrafficProfile {
            traffic_rps: self.start_rps,
            read_ratio: self.read_ratio.unwrap_or(defaults.read_ratio),
            cache_hit_ratio: self.cache_hit_ratio.unwrap_or(defaults.cache_hit_ratio),
        }
    }
}

/// Fully resolved traffic parameters for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficProfile {
    pub traffic_rps: f64,
    pub read_ratio: f64,
    pub cache_hit_ratio: f64,
}

impl TrafficProfile {
    pub fn new(traffic_rps: f64, read_ratio: f64, cache_hit_ratio: f64) -> Self {
        Self {
            traffic_rps,
            read_ratio,
            cache_hit_ratio,
        }
    }

    pub fn with_traffic(self, traffic_rps: f64) -> Self {
        Self { traffic_rps, ..self }
    }

    pub fn validate(&self) -> SimulatorResult<()> {
        if !self.traffic_rps.is_finite() || self.traffic_rps < 0.0 {
            return Err(SimulationError::invalid(
                "traffic_rps",
                format!("traffic_rps must be a non-negative number, got {}", self.traffic_rps),
            ));
        }
        validate_ratio("read_ratio", self.read_ratio)?;
        validate_ratio("cache_hit_ratio", self.cache_hit_ratio)?;
        Ok(())
    }
}

/// Inclusive traffic range walked by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start_rps: f64,
    pub end_rps: f64,
    pub step_rps: f64,
}

impl SweepRange {
    const EPSILON: f64 = 1e-9;

    pub fn new(start_rps: f64, end_rps: f64, step_rps: f64) -> Self {
        Self {
            start_rps,
            end_rps,
            step_rps,
        }
    }

    /// Number of traffic levels in the range, `end` included.
    pub fn point_count(&self) -> usize {
        (((self.end_rps - self.start_rps) / self.step_rps + Self::EPSILON).floor() as usize).saturating_add(1)
    }

    /// Traffic levels `start, start + step, ..` up to `end`
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.point_count()).map(move |i| self.start_rps + self.step_rps * i as f64)
    }

    pub fn validate(&self, max_points: usize) -> SimulatorResult<()> {
        if !self.start_rps.is_finite() || self.start_rps < 0.0 {
            return Err(SimulationError::invalid(
                "start_rps",
                "start_rps must be a non-negative number",
            ));
        }
        if !self.end_rps.is_finite() || self.end_rps < self.start_rps {
            return Err(SimulationError::invalid(
                "end_rps",
                "end_rps must be a number no smaller than start_rps",
            ));
        }
        if !self.step_rps.is_finite() || self.step_rps <= 0.0 {
            return Err(SimulationError::invalid(
                "step_rps",
                "step_rps must be a positive number",
            ));
        }

        let points = self.point_count();
        if points > max_points {
            return Err(SimulationError::invalid(
                "step_rps",
                format!("sweep would evaluate {} points, limit is {}", points, max_points),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_ratio(param: &str, value: f64) -> SimulatorResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimulationError::invalid(
            param,
            format!("{} must be within [0, 1], got {}", param, value),
        ));
    }
    Ok(())
}
