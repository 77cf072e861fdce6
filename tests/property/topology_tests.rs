//! Property-based tests for traffic routing and the system verdict

use proptest::prelude::*;
use scalelab::config::BaseLatencyTable;
use scalelab::engine::{Topology, TrafficSplit};
use scalelab::types::{Blueprint, NodeSpec, NodeType, SystemStatus, TrafficProfile};

fn ratio() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

fn node_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("load_balancer"),
        Just("app_server"),
        Just("database"),
        Just("cache"),
    ]
}

fn blueprint() -> impl Strategy<Value = Blueprint> {
    prop::collection::vec((node_type(), 0.0f64..10_000.0), 0..12).prop_map(|specs| {
        Blueprint::new(
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (t, capacity))| NodeSpec::new(format!("n{}", i), t, capacity))
                .collect(),
        )
    })
}

proptest! {
    /// Database traffic equals cache misses plus writes
    #[test]
    fn test_db_traffic_formula(
        traffic in 0.0f64..1_000_000.0,
        read in ratio(),
        hit in ratio(),
    ) {
        let split = TrafficSplit::compute(&TrafficProfile::new(traffic, read, hit));
        let expected = traffic * read * (1.0 - hit) + traffic * (1.0 - read);

        prop_assert!((split.db_traffic - expected).abs() <= 1e-6 * traffic.max(1.0));
        prop_assert!((split.reads + split.writes - traffic).abs() <= 1e-6 * traffic.max(1.0));
        prop_assert!(split.db_traffic <= traffic * (1.0 + 1e-12));
    }

    /// The system fails exactly when some database is overloaded
    #[test]
    fn test_failed_iff_database_overloaded(
        blueprint in blueprint(),
        traffic in 0.0f64..50_000.0,
        read in ratio(),
        hit in ratio(),
    ) {
        let topology = Topology::build(&blueprint, &BaseLatencyTable::default()).unwrap();
        let report = topology.simulate(&TrafficProfile::new(traffic, read, hit));

        let any_db_overloaded = report
            .nodes
            .iter()
            .any(|n| n.node_type == NodeType::Database && n.status.is_overloaded());

        prop_assert_eq!(report.system_status == SystemStatus::Failed, any_db_overloaded);
        prop_assert_eq!(report.nodes.len(), blueprint.len());
    }

    /// Databases share db traffic evenly and app servers share all traffic evenly
    #[test]
    fn test_even_split_within_groups(
        blueprint in blueprint(),
        traffic in 0.0f64..50_000.0,
    ) {
        let topology = Topology::build(&blueprint, &BaseLatencyTable::default()).unwrap();
        let evaluation = topology.evaluate(&TrafficProfile::new(traffic, 0.95, 0.8));

        let apps = topology.count(NodeType::AppServer);
        let dbs = topology.count(NodeType::Database);

        for snapshot in &evaluation.snapshots {
            let expected = match snapshot.node_type {
                NodeType::LoadBalancer => traffic,
                NodeType::Cache => evaluation.split.reads,
                NodeType::AppServer => traffic / apps as f64,
                NodeType::Database => evaluation.split.db_traffic / dbs as f64,
            };
            prop_assert!((snapshot.load - expected).abs() <= 1e-9 * expected.max(1.0));
        }
    }

    /// Any type outside the supported four is rejected at construction
    #[test]
    fn test_unknown_type_rejected(
        name in "[a-z_]{1,16}",
        capacity in 0.0f64..1000.0,
    ) {
        prop_assume!(name.parse::<NodeType>().is_err());

        let blueprint = Blueprint::new(vec![
            NodeSpec::new("lb1", "load_balancer", 100.0),
            NodeSpec::new("x1", name, capacity),
        ]);
        let result = Topology::build(&blueprint, &BaseLatencyTable::default());
        prop_assert!(result.is_err());
        prop_assert!(result.unwrap_err().is_configuration_error());
    }
}
