//! POST /simulate/sweep end-to-end tests

use super::common::*;
use scalelab::config::ScaleLabConfig;
use serde_json::{json, Value};

#[tokio::test]
async fn test_sweep_finds_first_failure() {
    let server = TestServer::spawn().await;

    let response = server
        .post("/simulate/sweep", json!({
            "start_rps": 100.0,
            "end_rps": 300.0,
            "step_rps": 50.0,
            "blueprint": scenario_blueprint()
        }))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0]["traffic_rps"], 100.0);
    assert_eq!(points[4]["traffic_rps"], 300.0);

    // db traffic is 0.24 × rps against capacity 50
    assert_eq!(points[2]["system_status"], "Running");
    assert_eq!(points[3]["system_status"], "Failed");
    assert_eq!(body["first_failure_rps"], 250.0);
    assert_eq!(body["read_ratio"], 0.95);
    assert_eq!(body["cache_hit_ratio"], 0.8);
}

#[tokio::test]
async fn test_sweep_without_failure() {
    let server = TestServer::spawn().await;

    let body: Value = server
        .post("/simulate/sweep", json!({
            "start_rps": 0.0,
            "end_rps": 100.0,
            "step_rps": 25.0,
            "blueprint": scenario_blueprint()
        }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["points"].as_array().unwrap().len(), 5);
    assert!(body["first_failure_rps"].is_null());
}

#[tokio::test]
async fn test_sweep_inverted_range_rejected() {
    let server = TestServer::spawn().await;

    let response = server
        .post("/simulate/sweep", json!({
            "start_rps": 500.0,
            "end_rps": 100.0,
            "step_rps": 50.0,
            "blueprint": scenario_blueprint()
        }))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_error_type(&body, "invalid_request_error");
}

#[tokio::test]
async fn test_sweep_point_limit() {
    let mut config = ScaleLabConfig::default();
    config.server.max_sweep_points = 10;
    let server = TestServer::spawn_with_config(config).await;

    let response = server
        .post("/simulate/sweep", json!({
            "start_rps": 0.0,
            "end_rps": 1000.0,
            "step_rps": 1.0,
            "blueprint": scenario_blueprint()
        }))
        .await;
    assert_eq!(response.status(), 400);
}
