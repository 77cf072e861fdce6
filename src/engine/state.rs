//! Engine state and statistics tracking

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::types::SystemStatus;

/// Thread-safe engine state tracking
pub struct EngineState {
    total_simulations: AtomicU64,
    total_sweeps: AtomicU64,
    failed_systems: AtomicU64,
    rejected_blueprints: AtomicU64,
    invalid_requests: AtomicU64,
    durations: RwLock<DurationTracker>,
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            total_simulations: AtomicU64::new(0),
            total_sweeps: AtomicU64::new(0),
            failed_systems: AtomicU64::new(0),
            rejected_blueprints: AtomicU64::new(0),
            invalid_requests: AtomicU64::new(0),
            durations: RwLock::new(DurationTracker::new()),
        }
    }

    /// Record one completed simulation
    pub fn record_simulation(&self, status: SystemStatus, elapsed: Duration) {
        self.total_simulations.fetch_add(1, Ordering::Relaxed);
        if status.is_failed() {
            self.failed_systems.fetch_add(1, Ordering::Relaxed);
        }
        self.durations.write().record(elapsed);
    }

    /// Record one completed sweep
    pub fn record_sweep(&self, elapsed: Duration) {
        self.total_sweeps.fetch_add(1, Ordering::Relaxed);
        self.durations.write().record(elapsed);
    }

    /// Record a blueprint that failed construction
    pub fn record_rejected_blueprint(&self) {
        self.rejected_blueprints.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request rejected by validation
    pub fn record_invalid_request(&self) {
        self.invalid_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_simulations: self.total_simulations.load(Ordering::Relaxed),
            total_sweeps: self.total_sweeps.load(Ordering::Relaxed),
            failed_systems: self.failed_systems.load(Ordering::Relaxed),
            rejected_blueprints: self.rejected_blueprints.load(Ordering::Relaxed),
            invalid_requests: self.invalid_requests.load(Ordering::Relaxed),
            evaluation: self.durations.read().stats(),
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.total_simulations.store(0, Ordering::Relaxed);
        self.total_sweeps.store(0, Ordering::Relaxed);
        self.failed_systems.store(0, Ordering::Relaxed);
        self.rejected_blueprints.store(0, Ordering::Relaxed);
        self.invalid_requests.store(0, Ordering::Relaxed);
        *self.durations.write() = DurationTracker::new();
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineStats {
    pub total_simulations: u64,
    pub total_sweeps: u64,
    pub failed_systems: u64,
    pub rejected_blueprints: u64,
    pub invalid_requests: u64,
    pub evaluation: DurationStats,
}

impl EngineStats {
    /// Fraction of simulations that ended with a failed system
    pub fn failure_rate(&self) -> f64 {
        if self.total_simulations == 0 {
            0.0
        } else {
            self.failed_systems as f64 / self.total_simulations as f64
        }
    }
}

/// Keeps the most recent evaluation durations for percentiles
struct DurationTracker {
    recent: VecDeque<Duration>,
    window: usize,
    count: u64,
    sum: Duration,
    min: Option<Duration>,
    max: Option<Duration>,
}

impl DurationTracker {
    fn new() -> Self {
        Self::with_window(1024)
    }

    fn with_window(window: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(window),
            window,
            count: 0,
            sum: Duration::ZERO,
            min: None,
            max: None,
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.sum += elapsed;

        self.min = Some(self.min.map_or(elapsed, |m| m.min(elapsed)));
        self.max = Some(self.max.map_or(elapsed, |m| m.max(elapsed)));

        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(elapsed);
    }

    fn stats(&self) -> DurationStats {
        if self.count == 0 {
            return DurationStats::default();
        }

        let to_ms = |d: &Duration| d.as_secs_f64() * 1000.0;
        let mut sorted: Vec<f64> = self.recent.iter().map(to_ms).collect();
        sorted.sort_by(f64::total_cmp);

        let percentile = |p: f64| -> f64 {
            let idx = ((p / 100.0) * (sorted.len() - 1) as f64) as usize;
            sorted[idx.min(sorted.len() - 1)]
        };

        DurationStats {
            count: self.count,
            mean_ms: to_ms(&self.sum) / self.count as f64,
            min_ms: self.min.as_ref().map_or(0.0, to_ms),
            max_ms: self.max.as_ref().map_or(0.0, to_ms),
            p50_ms: percentile(50.0),
            p99_ms: percentile(99.0),
        }
    }
}

/// Wall-clock cost of evaluations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationStats {
    pub count: u64,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p50_ms: f64,
    pub p99_ms: f64,
}
