//! POST /simulate end-to-end tests

use super::common::*;
use serde_json::{json, Value};

#[tokio::test]
async fn test_reference_scenario_is_running() {
    let server = TestServer::spawn().await;

    let response = server
        .post("/simulate", simulate_request(100.0, scenario_blueprint()))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["system_status"], "Running");
    assert_eq!(body["db_traffic"], 24.0);

    let app1 = node(&body, "app1");
    assert_eq!(app1["type"], "app_server");
    assert_eq!(app1["load"], 50.0);
    assert_eq!(app1["latency"], 20.0);
    assert_eq!(app1["status"], "Healthy");

    let db1 = node(&body, "db1");
    assert_eq!(db1["load"], 24.0);
    assert_eq!(db1["latency"], 38.46);
    assert_eq!(db1["error_rate"], 0.0);
    assert_eq!(db1["status"], "Healthy");

    let cache1 = node(&body, "cache1");
    assert_eq!(cache1["load"], 95.0);

    let lb1 = node(&body, "lb1");
    assert_eq!(lb1["load"], 100.0);
}

#[tokio::test]
async fn test_database_overload_fails_system() {
    let server = TestServer::spawn().await;

    let response = server
        .post("/simulate", simulate_request(5000.0, scenario_blueprint()))
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["system_status"], "Failed");
    assert_eq!(body["db_traffic"], 1200.0);

    let db1 = node(&body, "db1");
    assert_eq!(db1["status"], "Overloaded");
    assert_eq!(db1["latency"], 2400.0);
    assert_eq!(db1["error_rate"], 0.958);
}

#[tokio::test]
async fn test_nodes_preserve_blueprint_order() {
    let server = TestServer::spawn().await;

    let body: Value = server
        .post("/simulate", simulate_request(100.0, scenario_blueprint()))
        .await
        .json()
        .await
        .unwrap();

    let ids: Vec<&str> = body["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["lb1", "app1", "app2", "cache1", "db1"]);
}

#[tokio::test]
async fn test_explicit_ratios_override_defaults() {
    let server = TestServer::spawn().await;

    let body: Value = server
        .post("/simulate", json!({
            "traffic_rps": 100.0,
            "read_ratio": 1.0,
            "cache_hit_ratio": 1.0,
            "blueprint": scenario_blueprint()
        }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["db_traffic"], 0.0);
    assert_eq!(node(&body, "db1")["latency"], 20.0);
}

#[tokio::test]
async fn test_zero_capacity_database() {
    let server = TestServer::spawn().await;

    let blueprint = json!({
        "nodes": [{"id": "db1", "type": "database", "capacity": 0}]
    });
    let body: Value = server
        .post("/simulate", simulate_request(0.0, blueprint))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["system_status"], "Failed");
    let db1 = node(&body, "db1");
    assert_eq!(db1["latency"], 9999.0);
    assert_eq!(db1["error_rate"], 1.0);
}

#[tokio::test]
async fn test_empty_blueprint() {
    let server = TestServer::spawn().await;

    let body: Value = server
        .post("/simulate", simulate_request(100.0, json!({"nodes": []})))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["system_status"], "Running");
    assert_eq!(body["total_latency"], 0.0);
    assert_eq!(body["nodes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_repeated_calls_are_independent() {
    let server = TestServer::spawn().await;

    let first: Value = server
        .post("/simulate", simulate_request(100.0, scenario_blueprint()))
        .await
        .json()
        .await
        .unwrap();
    let _: Value = server
        .post("/simulate", simulate_request(5000.0, scenario_blueprint()))
        .await
        .json()
        .await
        .unwrap();
    let again: Value = server
        .post("/simulate", simulate_request(100.0, scenario_blueprint()))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(first, again);
}

#[tokio::test]
async fn test_reference_blueprint_endpoint() {
    let server = TestServer::spawn().await;

    let response = server.get("/blueprints/reference").await;
    assert_eq!(response.status(), 200);

    let blueprint: Value = response.json().await.unwrap();
    assert_eq!(blueprint["nodes"].as_array().unwrap().len(), 5);

    let body: Value = server
        .post("/simulate", simulate_request(1000.0, blueprint))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["system_status"], "Running");
}
