//! Property-based tests for configuration validation

use proptest::prelude::*;
use scalelab::config::ScaleLabConfig;
use scalelab::types::NodeType;

proptest! {
    /// Test that valid port numbers pass validation
    #[test]
    fn test_valid_port_passes(
        port in 1u16..=65535,
    ) {
        let mut config = ScaleLabConfig::default();
        config.server.port = port;

        let result = config.validate();
        prop_assert!(result.is_ok(), "Port {} should be valid", port);
    }

    /// Ratios inside [0, 1] are accepted as traffic defaults
    #[test]
    fn test_valid_traffic_defaults(
        read in 0.0f64..=1.0,
        hit in 0.0f64..=1.0,
    ) {
        let mut config = ScaleLabConfig::default();
        config.traffic.read_ratio = read;
        config.traffic.cache_hit_ratio = hit;

        prop_assert!(config.validate().is_ok());
    }

    /// Ratios above 1 are rejected
    #[test]
    fn test_ratio_above_one_fails(
        ratio in 1.000_001f64..100.0,
    ) {
        let mut config = ScaleLabConfig::default();
        config.traffic.cache_hit_ratio = ratio;

        prop_assert!(config.validate().is_err());
    }

    /// Any non-negative base latency is valid for any node type
    #[test]
    fn test_valid_base_latency(
        latency in 0.0f64..10_000.0,
        index in 0usize..4,
    ) {
        let mut config = ScaleLabConfig::default();
        config.latency = config.latency.with(NodeType::ALL[index], latency);

        prop_assert!(config.validate().is_ok());
        prop_assert_eq!(config.latency.get(NodeType::ALL[index]), latency);
    }

    /// Negative base latency is rejected
    #[test]
    fn test_negative_base_latency_fails(
        latency in -10_000.0f64..-0.001,
        index in 0usize..4,
    ) {
        let mut config = ScaleLabConfig::default();
        config.latency = config.latency.with(NodeType::ALL[index], latency);

        prop_assert!(config.validate().is_err());
    }

    /// Host strings never panic validation
    #[test]
    fn test_host_string(
        host in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
    ) {
        let mut config = ScaleLabConfig::default();
        config.server.host = host;

        let _ = config.validate();
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_port_fails() {
        let mut config = ScaleLabConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(result.is_err(), "Port 0 should fail validation");
    }

    #[test]
    fn test_zero_timeout_fails() {
        let mut config = ScaleLabConfig::default();
        config.server.request_timeout = Duration::ZERO;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_sweep_points_fails() {
        let mut config = ScaleLabConfig::default();
        config.server.max_sweep_points = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_valid() {
        let config = ScaleLabConfig::default();
        let result = config.validate();
        assert!(result.is_ok(), "Default config should be valid: {:?}", result);
    }

    #[test]
    fn test_nan_ratio_fails() {
        let mut config = ScaleLabConfig::default();
        config.traffic.read_ratio = f64::NAN;

        assert!(config.validate().is_err());
    }
}
