//! Property-based tests using proptest
//!
//! Tests invariants of the node model, traffic routing, and configuration.

pub mod node_tests;
pub mod topology_tests;
pub mod config_tests;
