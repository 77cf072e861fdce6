//! Integration test module
//!
//! Contains end-to-end tests for all API endpoints.

pub mod simulate_tests;
pub mod sweep_tests;
pub mod health_tests;
