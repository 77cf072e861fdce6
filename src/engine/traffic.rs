//! Aggregate traffic split across node-type groups

use serde::{Deserialize, Serialize};

use crate::types::TrafficProfile;

/// Derived request rates for one traffic profile
///
/// Stages run in a fixed order because each consumes the previous one's
/// output: reads/writes, then cache hits/misses, then database traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficSplit {
    pub traffic_rps: f64,
    pub reads: f64,
    pub writes: f64,
    pub cache_hits: f64,
    pub cache_misses: f64,
    /// Cache misses plus all writes
    pub db_traffic: f64,
}

impl TrafficSplit {
    pub fn compute(profile: &TrafficProfile) -> Self {
        let traffic_rps = profile.traffic_rps;

        let reads = traffic_rps * profile.read_ratio;
        let writes = traffic_rps * (1.0 - profile.read_ratio);

        let cache_hits = reads * profile.cache_hit_ratio;
        let cache_misses = reads - cache_hits;

        let db_traffic = cache_misses + writes;

        Self {
            traffic_rps,
            reads,
            writes,
            cache_hits,
            cache_misses,
            db_traffic,
        }
    }

    /// Rate seen by each load balancer (every front sees all traffic)
    pub fn per_load_balancer(&self) -> f64 {
        self.traffic_rps
    }

    /// Rate seen by each app server, or `None` when there are none
    pub fn per_app_server(&self, count: usize) -> Option<f64> {
        (count > 0).then(|| self.traffic_rps / count as f64)
    }

    /// Rate seen by each cache (every cache sees all reads)
    pub fn per_cache(&self) -> f64 {
        self.reads
    }

    /// Rate seen by each database, or `None` when there are none
    pub fn per_database(&self, count: usize) -> Option<f64> {
        (count > 0).then(|| self.db_traffic / count as f64)
    }
}
