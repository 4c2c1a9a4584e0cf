//! Integration tests for the qdice server API.

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use qdice_adapter_sim::{QuantileSampler, Sampler, SeededSampler, SimulatorBackend};
use qdice_engine::MeasurementEngine;
use qdice_server::{AppState, GateSetChoice, ServerConfig, create_router};
use serde_json::{Value, json};

// ============================================================================
// Test helpers
// ============================================================================

fn state_with_sampler(config: ServerConfig, sampler: Arc<dyn Sampler>) -> Arc<AppState> {
    let backend = SimulatorBackend::new()
        .with_gate_set(config.gate_set.gate_set())
        .with_sampler(sampler);
    let engine = MeasurementEngine::new(Arc::new(backend))
        .with_optimization_level(config.optimization_level);
    Arc::new(AppState::with_engine(config, engine))
}

fn quantile_server(q: f64) -> TestServer {
    let config = ServerConfig {
        gate_set: GateSetChoice::Native,
        ..ServerConfig::default()
    };
    test_server(state_with_sampler(config, Arc::new(QuantileSampler::new(q))))
}

fn test_server(state: Arc<AppState>) -> TestServer {
    let router = create_router(state);
    TestServer::new(router).expect("test server")
}

async fn measure(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/measure").json(&body).await;
    response.assert_status_ok();
    response.json()
}

async fn assert_failure(server: &TestServer, body: Value, status: StatusCode) -> String {
    let response = server.post("/api/measure").json(&body).await;
    response.assert_status(status);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body.get("result").is_none());
    body["error"].as_str().expect("error message").to_string()
}

// ============================================================================
// Health endpoint
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = test_server(Arc::new(AppState::default()));
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "simulator");
    assert!(body["version"].as_str().is_some());
}

// ============================================================================
// Measurement
// ============================================================================

#[tokio::test]
async fn test_measure_defaults() {
    let server = test_server(Arc::new(AppState::default()));
    let body = measure(&server, json!({})).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["mode"], "superposition");
    assert_eq!(body["probability_target"], 0.5);
    let result = body["result"].as_u64().unwrap();
    assert!(result == 0 || result == 1);
}

#[tokio::test]
async fn test_measure_echoes_inputs() {
    let server = quantile_server(0.5);

    let body = measure(&server, json!({"mode": "tunneling", "probability": 0.25})).await;
    assert_eq!(body["mode"], "tunneling");
    assert_eq!(body["probability_target"], 0.25);

    let body = measure(&server, json!({"mode": "navigation", "probability": 1})).await;
    assert_eq!(body["probability_target"], json!(1));
    assert_eq!(body["result"], 1);

    let body = measure(&server, json!({"mode": "warp", "probability": 0.9})).await;
    assert_eq!(body["mode"], "warp");
    assert_eq!(body["result"], 0);
}

#[tokio::test]
async fn test_missing_probability_matches_explicit_half() {
    for q in [0.2, 0.7] {
        let server = quantile_server(q);
        let implicit = measure(&server, json!({"mode": "navigation"})).await;
        let explicit = measure(&server, json!({"mode": "navigation", "probability": 0.5})).await;

        assert_eq!(implicit["probability_target"], 0.5);
        assert_eq!(implicit["result"], explicit["result"]);
    }
}

#[tokio::test]
async fn test_navigation_boundaries() {
    for q in [0.0, 0.5, 0.999_999] {
        let server = quantile_server(q);
        for _ in 0..5 {
            let body = measure(&server, json!({"mode": "navigation", "probability": 0})).await;
            assert_eq!(body["result"], 0);
            let body = measure(&server, json!({"mode": "navigation", "probability": 1})).await;
            assert_eq!(body["result"], 1);
        }
    }
}

#[tokio::test]
async fn test_navigation_frequency() {
    let state = state_with_sampler(ServerConfig::default(), Arc::new(SeededSampler::new(3)));
    let server = test_server(state);

    let trials = 1000;
    let mut ones = 0;
    for _ in 0..trials {
        let body = measure(&server, json!({"mode": "navigation", "probability": 0.3})).await;
        ones += body["result"].as_u64().unwrap();
    }
    let freq = ones as f64 / trials as f64;
    assert!((freq - 0.3).abs() < 0.05, "freq={freq}");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_out_of_range_probability_fails_with_500() {
    let server = quantile_server(0.5);
    for p in [-0.1, 1.5] {
        let error = assert_failure(
            &server,
            json!({"mode": "navigation", "probability": p}),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .await;
        assert!(error.contains("probability"));
    }
}

#[tokio::test]
async fn test_split_error_status_maps_input_errors_to_400() {
    let config = ServerConfig {
        split_error_status: true,
        ..ServerConfig::default()
    };
    let server = test_server(Arc::new(AppState::new(config)));

    assert_failure(
        &server,
        json!({"mode": "tunneling", "probability": 1.5}),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_failure(
        &server,
        json!({"mode": "navigation", "probability": "high"}),
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_failure(&server, json!({"mode": 7}), StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_wrong_field_types_fail() {
    let server = quantile_server(0.5);
    for mode in ["navigation", "tunneling"] {
        let error = assert_failure(
            &server,
            json!({"mode": mode, "probability": "0.5"}),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .await;
        assert!(error.contains("probability"));
    }
    assert_failure(&server, json!({"mode": 7}), StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_failure(&server, json!([1, 2]), StatusCode::INTERNAL_SERVER_ERROR).await;
}

#[tokio::test]
async fn test_unused_probability_of_any_type_is_echoed() {
    let server = quantile_server(0.75);

    let body = measure(&server, json!({"mode": "superposition", "probability": "0.5"})).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["probability_target"], "0.5");
    assert_eq!(body["result"], 1);

    let body = measure(&server, json!({"mode": "warp", "probability": [1, 2]})).await;
    assert_eq!(body["mode"], "warp");
    assert_eq!(body["probability_target"], json!([1, 2]));
    assert_eq!(body["result"], 0);
}

#[tokio::test]
async fn test_malformed_body_uses_failure_shape() {
    let server = quantile_server(0.5);
    let response = server.post("/api/measure").text("{not json").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some());
}

// ============================================================================
// CORS
// ============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = quantile_server(0.5);
    let response = server
        .post("/api/measure")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("http://game.example"),
        )
        .json(&json!({}))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        HeaderValue::from_static("*")
    );
}
