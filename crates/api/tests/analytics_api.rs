//! HTTP-level integration tests for the `/api/v1/analytics` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json};
use serde_json::{json, Value};

fn run(n: u32, status: &str, variance: Option<f64>, completed_at: Option<&str>) -> Value {
    json!({
        "id": format!("00000000-0000-0000-0000-{n:012}"),
        "run_number": format!("RUN-{n:03}"),
        "status": status,
        "estimated_total_weight_grams": 100.0,
        "actual_total_weight_grams": 100.0 + variance.unwrap_or(0.0),
        "variance_grams": variance,
        "variance_percentage": variance,
        "completed_at": completed_at,
    })
}

// ---------------------------------------------------------------------------
// Test: variance stats over completed runs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn variance_stats_aggregates_completed_runs() {
    let response = post_json(
        build_test_app(),
        "/api/v1/analytics/variance-stats",
        json!({
            "runs": [
                run(1, "completed", Some(10.0), None),
                run(2, "completed", Some(-5.0), None),
                run(3, "completed", Some(15.0), None),
                run(4, "in_progress", None, None),
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stats = &json["data"];
    assert_eq!(stats["run_count"], 3);
    let avg = stats["average_variance_grams"].as_f64().unwrap();
    assert!((avg - 6.67).abs() < 0.01);
    assert_eq!(stats["max_variance_grams"], 15.0);
    assert_eq!(stats["min_variance_grams"], -5.0);
    assert_eq!(stats["runs_over_estimate"], 2);
    assert_eq!(stats["runs_under_estimate"], 1);
}

// ---------------------------------------------------------------------------
// Test: no runs yields zeros, never null
// ---------------------------------------------------------------------------

#[tokio::test]
async fn variance_stats_for_no_runs_are_zero() {
    let response = post_json(
        build_test_app(),
        "/api/v1/analytics/variance-stats",
        json!({ "runs": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stats = json["data"].as_object().unwrap();
    for (field, value) in stats {
        assert_eq!(value.as_f64(), Some(0.0), "{field} should be zero");
    }
}

// ---------------------------------------------------------------------------
// Test: unknown status is rejected by deserialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_status_is_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/analytics/variance-stats",
        json!({ "runs": [run(1, "paused", Some(1.0), None)] }),
    )
    .await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Test: per-model variance groups run items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn variance_by_model_groups_items() {
    let mut completed = run(1, "completed", Some(0.0), None);
    completed["items"] = json!([
        {
            "model_id": "00000000-0000-0000-0000-00000000000a",
            "model_name": "Dragon",
            "quantity": 2,
            "estimated_weight_grams": 80.0,
            "actual_weight_grams": 100.0,
        },
    ]);

    let response = post_json(
        build_test_app(),
        "/api/v1/analytics/variance-by-model",
        json!({ "runs": [completed] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["model_name"], "Dragon");
    assert_eq!(data[0]["variance_grams"], 20.0);
    assert_eq!(data[0]["variance_percentage"], 25.0);
}

// ---------------------------------------------------------------------------
// Test: estimated-vs-actual series is ordered by completion time
// ---------------------------------------------------------------------------

#[tokio::test]
async fn estimated_vs_actual_is_chronological() {
    let response = post_json(
        build_test_app(),
        "/api/v1/analytics/estimated-vs-actual",
        json!({
            "runs": [
                run(1, "completed", Some(4.0), Some("2024-05-02T10:00:00Z")),
                run(2, "completed", Some(-2.0), Some("2024-05-01T10:00:00Z")),
                run(3, "cancelled", None, Some("2024-04-30T10:00:00Z")),
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let points = json["data"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["run_number"], "RUN-002");
    assert_eq!(points[0]["actual_grams"], 98.0);
    assert_eq!(points[1]["run_number"], "RUN-001");
}
