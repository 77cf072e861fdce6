//! Property-based tests for the single-node model

use proptest::prelude::*;
use scalelab::node::{evaluate, NodeDefinition, SATURATION_LATENCY_MS};
use scalelab::types::{NodeStatus, NodeType};

fn node(capacity: f64, base_latency: f64) -> NodeDefinition {
    NodeDefinition::new("n1", NodeType::AppServer, capacity, base_latency)
}

proptest! {
    /// Below capacity a node is healthy and never faster than its base latency
    #[test]
    fn test_below_capacity_is_healthy(
        capacity in 1.0f64..100_000.0,
        fraction in 0.0f64..0.999,
        base in 0.0f64..100.0,
    ) {
        let rps = capacity * fraction;
        let snapshot = evaluate(&node(capacity, base), rps);

        prop_assert_eq!(snapshot.status, NodeStatus::Healthy);
        prop_assert_eq!(snapshot.error_rate, 0.0);
        prop_assert!(snapshot.latency >= base);
        prop_assert_eq!(snapshot.load, rps);
    }

    /// Latency grows strictly with load while below capacity
    #[test]
    fn test_latency_increases_with_load(
        capacity in 10.0f64..10_000.0,
        a in 0.0f64..0.9,
        delta in 0.01f64..0.09,
        base in 1.0f64..100.0,
    ) {
        let definition = node(capacity, base);
        let lower = evaluate(&definition, capacity * a);
        let higher = evaluate(&definition, capacity * (a + delta));

        prop_assert!(higher.latency > lower.latency);
    }

    /// At or past capacity a node is overloaded with a bounded error rate
    #[test]
    fn test_overload_error_rate_bounded(
        capacity in 1.0f64..10_000.0,
        factor in 1.0f64..1000.0,
        base in 0.0f64..100.0,
    ) {
        let rps = capacity * factor;
        let snapshot = evaluate(&node(capacity, base), rps);

        prop_assert_eq!(snapshot.status, NodeStatus::Overloaded);
        prop_assert!(snapshot.error_rate >= 0.0);
        prop_assert!(snapshot.error_rate <= 1.0);
        prop_assert!((snapshot.latency - base * factor * 5.0).abs() <= 1e-6 * snapshot.latency.max(1.0));
    }

    /// Strictly past capacity some requests fail
    #[test]
    fn test_strict_overload_has_errors(
        capacity in 1.0f64..10_000.0,
        factor in 1.01f64..1000.0,
    ) {
        let snapshot = evaluate(&node(capacity, 10.0), capacity * factor);
        prop_assert!(snapshot.error_rate > 0.0);
    }

    /// Zero capacity is fully failed at any load
    #[test]
    fn test_zero_capacity_saturates(
        rps in 0.0f64..1_000_000.0,
        base in 0.0f64..100.0,
    ) {
        let snapshot = evaluate(&node(0.0, base), rps);

        prop_assert_eq!(snapshot.status, NodeStatus::Overloaded);
        prop_assert_eq!(snapshot.latency, SATURATION_LATENCY_MS);
        prop_assert_eq!(snapshot.error_rate, 1.0);
    }

    /// Evaluation has no hidden state
    #[test]
    fn test_evaluate_is_deterministic(
        capacity in 0.0f64..10_000.0,
        rps in 0.0f64..20_000.0,
    ) {
        let definition = node(capacity, 10.0);
        prop_assert_eq!(evaluate(&definition, rps), evaluate(&definition, rps));
    }

    /// Rounded report values never drift more than half a unit in the last place
    #[test]
    fn test_report_rounding(
        capacity in 1.0f64..10_000.0,
        rps in 0.0f64..20_000.0,
    ) {
        let snapshot = evaluate(&node(capacity, 10.0), rps);
        let report = snapshot.to_report();

        prop_assert!((report.load - snapshot.load).abs() <= 0.005 + 1e-9);
        prop_assert!((report.error_rate - snapshot.error_rate).abs() <= 0.0005 + 1e-9);
        prop_assert_eq!(report.status, snapshot.status);
    }
}
