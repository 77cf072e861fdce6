//! Health, metrics, and admin endpoint tests

use super::common::*;
use serde_json::Value;

#[tokio::test]
async fn test_root() {
    let server = TestServer::spawn().await;

    let body: Value = server.get("/").await.json().await.unwrap();
    assert_eq!(body["message"], "ScaleLab Simulation API is running");
    assert!(body["endpoints"].as_array().unwrap().iter().any(|e| e == "/simulate"));
}

#[tokio::test]
async fn test_health_and_readiness() {
    let server = TestServer::spawn().await;

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["config"]["status"], "pass");
    }

    for path in ["/ready", "/readyz"] {
        let response = server.get(path).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["ready"], true);
    }
}

#[tokio::test]
async fn test_version() {
    let server = TestServer::spawn().await;

    let body: Value = server.get("/version").await.json().await.unwrap();
    assert_eq!(body["name"], "scalelab");
    assert_eq!(body["version"], scalelab::VERSION);
}

#[tokio::test]
async fn test_metrics_after_simulations() {
    let server = TestServer::spawn().await;

    server.post("/simulate", simulate_request(100.0, scenario_blueprint())).await;
    server.post("/simulate", simulate_request(5000.0, scenario_blueprint())).await;

    let response = server.get("/metrics").await;
    assert_eq!(response.status(), 200);

    let text = response.text().await.unwrap();
    assert!(text.contains("scalelab_simulations_total{status=\"Running\"} 1"));
    assert!(text.contains("scalelab_simulations_total{status=\"Failed\"} 1"));
    assert_eq!(text.matches("# TYPE scalelab_simulations_total counter").count(), 1);
    assert!(text.contains("scalelab_system_failures_total 1"));
    assert!(text.contains("scalelab_simulation_duration_seconds_count 2"));
    assert!(text.contains("scalelab_in_flight_requests"));
}

#[tokio::test]
async fn test_admin_stats_and_reset() {
    let server = TestServer::spawn().await;

    server.post("/simulate", simulate_request(5000.0, scenario_blueprint())).await;

    let stats: Value = server.get("/admin/stats").await.json().await.unwrap();
    assert_eq!(stats["total_simulations"], 1);
    assert_eq!(stats["failed_systems"], 1);

    let response = server.client.post(server.url("/admin/stats/reset")).send().await.unwrap();
    assert_eq!(response.status(), 204);

    let stats: Value = server.get("/admin/stats").await.json().await.unwrap();
    assert_eq!(stats["total_simulations"], 0);
}

#[tokio::test]
async fn test_admin_config() {
    let server = TestServer::spawn().await;

    let config: Value = server.get("/admin/config").await.json().await.unwrap();
    assert_eq!(config["latency"]["database"], 20.0);
    assert_eq!(config["traffic"]["read_ratio"], 0.95);
    assert_eq!(config["server"]["request_timeout"], "30s");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_cors_preflight_for_ui_origin() {
    let server = TestServer::spawn().await;

    let response = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/simulate"))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}
