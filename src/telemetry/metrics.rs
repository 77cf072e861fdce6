//! Prometheus metrics implementation

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use parking_lot::RwLock;

use crate::types::SystemStatus;

/// In-process metrics registry rendered in Prometheus text format
pub struct MetricsRegistry {
    counters: RwLock<BTreeMap<String, AtomicU64>>,
    gauges: RwLock<BTreeMap<String, AtomicU64>>,
    histograms: RwLock<BTreeMap<String, Histogram>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(BTreeMap::new()),
            gauges: RwLock::new(BTreeMap::new()),
            histograms: RwLock::new(BTreeMap::new()),
        }
    }

    /// Increment a counter
    pub fn counter_inc(&self, name: &str, value: u64) {
        let counters = self.counters.read();
        if let Some(counter) = counters.get(name) {
            counter.fetch_add(value, Ordering::Relaxed);
        } else {
            drop(counters);
            let mut counters = self.counters.write();
            counters.entry(name.to_string())
                .or_insert_with(|| AtomicU64::new(0))
                .fetch_add(value, Ordering::Relaxed);
        }
    }

    /// Set a gauge value
    pub fn gauge_set(&self, name: &str, value: u64) {
        let mut gauges = self.gauges.write();
        gauges.entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .store(value, Ordering::Relaxed);
    }

    /// Record a histogram observation
    pub fn histogram_observe(&self, name: &str, value: f64) {
        let histograms = self.histograms.read();
        if let Some(hist) = histograms.get(name) {
            hist.observe(value);
        } else {
            drop(histograms);
            let mut histograms = self.histograms.write();
            histograms.entry(name.to_string())
                .or_insert_with(Histogram::new)
                .observe(value);
        }
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        let counters = self.counters.read();
        write_families(
            &mut output,
            "counter",
            counters.iter().map(|(name, c)| (name.as_str(), c.load(Ordering::Relaxed))),
        );

        let gauges = self.gauges.read();
        write_families(
            &mut output,
            "gauge",
            gauges.iter().map(|(name, g)| (name.as_str(), g.load(Ordering::Relaxed))),
        );

        for (name, hist) in self.histograms.read().iter() {
            let snapshot = hist.cumulative();
            output.push_str(&format!("# TYPE {} histogram\n", name));
            for (bound, count) in DURATION_BUCKETS.iter().zip(snapshot.buckets.iter()) {
                output.push_str(&format!("{}_bucket{{le=\"{}\"}} {}\n", name, bound, count));
            }
            output.push_str(&format!("{}_bucket{{le=\"+Inf\"}} {}\n", name, snapshot.count));
            output.push_str(&format!("{}_sum {}\n", name, snapshot.sum));
            output.push_str(&format!("{}_count {}\n", name, snapshot.count));
        }

        output
    }

    /// Reset all metrics
    pub fn reset(&self) {
        for counter in self.counters.write().values() {
            counter.store(0, Ordering::Relaxed);
        }
        for gauge in self.gauges.write().values() {
            gauge.store(0, Ordering::Relaxed);
        }
        self.histograms.write().clear();
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Metric family name without its label set
fn family(name: &str) -> &str {
    name.split('{').next().unwrap_or(name)
}

/// Write samples grouped by family, one TYPE line per family
fn write_families<'a>(output: &mut String, kind: &str, samples: impl Iterator<Item = (&'a str, u64)>) {
    let mut families: BTreeMap<&str, Vec<(&str, u64)>> = BTreeMap::new();
    for (name, value) in samples {
        families.entry(family(name)).or_default().push((name, value));
    }

    for (family, samples) in families {
        output.push_str(&format!("# TYPE {} {}\n", family, kind));
        for (name, value) in samples {
            output.push_str(&format!("{} {}\n", name, value));
        }
    }
}

/// Bucket bounds in seconds; evaluations are sub-millisecond
pub const DURATION_BUCKETS: [f64; 9] = [0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];

/// Histogram with lifetime cumulative buckets and a bounded window of recent
/// values for percentiles
pub struct Histogram {
    inner: RwLock<HistogramInner>,
}

struct HistogramInner {
    recent: VecDeque<f64>,
    buckets: [u64; DURATION_BUCKETS.len()],
    sum: f64,
    count: u64,
}

/// Lifetime bucket counts, `buckets[i]` counting values `<= DURATION_BUCKETS[i]`
#[derive(Debug, Clone, Default)]
pub struct CumulativeBuckets {
    pub buckets: [u64; DURATION_BUCKETS.len()],
    pub sum: f64,
    pub count: u64,
}

impl Histogram {
    const WINDOW: usize = 10_000;

    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HistogramInner {
                recent: VecDeque::with_capacity(Self::WINDOW),
                buckets: [0; DURATION_BUCKETS.len()],
                sum: 0.0,
                count: 0,
            }),
        }
    }

    pub fn observe(&self, value: f64) {
        let mut inner = self.inner.write();
        if inner.recent.len() == Self::WINDOW {
            inner.recent.pop_front();
        }
        inner.recent.push_back(value);
        for (bound, bucket) in DURATION_BUCKETS.iter().zip(inner.buckets.iter_mut()) {
            if value <= *bound {
                *bucket += 1;
            }
        }
        inner.sum += value;
        inner.count += 1;
    }

    pub fn cumulative(&self) -> CumulativeBuckets {
        let inner = self.inner.read();
        CumulativeBuckets {
            buckets: inner.buckets,
            sum: inner.sum,
            count: inner.count,
        }
    }

    pub fn stats(&self) -> HistogramStats {
        let inner = self.inner.read();
        if inner.recent.is_empty() {
            return HistogramStats::default();
        }

        let mut sorted: Vec<f64> = inner.recent.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);

        let percentile = |p: f64| -> f64 {
            let idx = ((p / 100.0) * (sorted.len() - 1) as f64) as usize;
            sorted[idx.min(sorted.len() - 1)]
        };

        HistogramStats {
            count: inner.count,
            sum: inner.sum,
            mean: inner.sum / inner.count as f64,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            p50: percentile(50.0),
            p99: percentile(99.0),
        }
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

/// Histogram statistics
#[derive(Debug, Clone, Default)]
pub struct HistogramStats {
    pub count: u64,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p99: f64,
}

/// Pre-defined metric names
pub mod metric_names {
    pub const SIMULATIONS_TOTAL: &str = "scalelab_simulations_total";
    pub const SWEEPS_TOTAL: &str = "scalelab_sweeps_total";
    pub const SYSTEM_FAILURES: &str = "scalelab_system_failures_total";
    pub const CONFIGURATION_ERRORS: &str = "scalelab_configuration_errors_total";
    pub const ERRORS_TOTAL: &str = "scalelab_errors_total";
    pub const SIMULATION_DURATION: &str = "scalelab_simulation_duration_seconds";
    pub const OVERLOADED_NODES: &str = "scalelab_overloaded_nodes";
    pub const IN_FLIGHT_REQUESTS: &str = "scalelab_in_flight_requests";
}

/// Convenience functions for ScaleLab metrics
pub struct SimulatorMetrics {
    registry: MetricsRegistry,
}

impl SimulatorMetrics {
    pub fn new() -> Self {
        let metrics = Self {
            registry: MetricsRegistry::new(),
        };

        metrics.set_in_flight(0);
        metrics
    }

    /// Record a completed simulation
    pub fn record_simulation(&self, duration: Duration, status: SystemStatus, overloaded_nodes: usize) {
        let key = format!("{}{{status=\"{}\"}}", metric_names::SIMULATIONS_TOTAL, status);
        self.registry.counter_inc(&key, 1);
        if status.is_failed() {
            self.registry.counter_inc(metric_names::SYSTEM_FAILURES, 1);
        }
        self.registry.gauge_set(metric_names::OVERLOADED_NODES, overloaded_nodes as u64);
        self.registry.histogram_observe(metric_names::SIMULATION_DURATION, duration.as_secs_f64());
    }

    /// Record a completed sweep
    pub fn record_sweep(&self, duration: Duration) {
        self.registry.counter_inc(metric_names::SWEEPS_TOTAL, 1);
        self.registry.histogram_observe(metric_names::SIMULATION_DURATION, duration.as_secs_f64());
    }

    /// Record a failed request by error type
    pub fn record_error(&self, error_type: &str) {
        let key = format!("{}{{type=\"{}\"}}", metric_names::ERRORS_TOTAL, error_type);
        self.registry.counter_inc(&key, 1);
        if error_type == "configuration_error" {
            self.registry.counter_inc(metric_names::CONFIGURATION_ERRORS, 1);
        }
    }

    /// Set the number of in-flight HTTP requests
    pub fn set_in_flight(&self, count: u64) {
        self.registry.gauge_set(metric_names::IN_FLIGHT_REQUESTS, count);
    }

    /// Export metrics in Prometheus format
    pub fn export(&self) -> String {
        self.registry.export_prometheus()
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.registry.reset();
    }
}

impl Default for SimulatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}
