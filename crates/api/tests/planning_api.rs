//! HTTP-level integration tests for `/api/v1/planning/material-suggestions`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json};
use serde_json::{json, Value};

const URI: &str = "/api/v1/planning/material-suggestions";

const BLUE: &str = "00000000-0000-0000-0000-0000000000b1";
const RED: &str = "00000000-0000-0000-0000-0000000000ed";
const GREEN: &str = "00000000-0000-0000-0000-00000000006e";
const MODEL_A: &str = "00000000-0000-0000-0000-00000000000a";
const MODEL_B: &str = "00000000-0000-0000-0000-00000000000b";

fn spool(id: &str, color: &str, current: f64, active: bool) -> Value {
    json!({
        "id": id,
        "material_type": "PLA",
        "color": color,
        "current_weight_grams": current,
        "initial_weight_grams": 1000.0,
        "is_active": active,
    })
}

fn catalog() -> Value {
    json!([
        {
            "id": MODEL_A,
            "name": "Model A",
            "bom": [
                { "spool_id": BLUE, "weight_grams_per_unit": 50.0 },
                { "spool_id": RED, "weight_grams_per_unit": 30.0 },
            ],
        },
        {
            "id": MODEL_B,
            "name": "Model B",
            "bom": [
                { "spool_id": RED, "weight_grams_per_unit": 40.0 },
                { "spool_id": GREEN, "weight_grams_per_unit": 60.0 },
            ],
        },
    ])
}

// ---------------------------------------------------------------------------
// Test: shared spools are summed across models
// ---------------------------------------------------------------------------

#[tokio::test]
async fn aggregates_shared_spools() {
    let response = post_json(
        build_test_app(),
        URI,
        json!({
            "selections": [
                { "model_id": MODEL_A, "quantity": 1 },
                { "model_id": MODEL_B, "quantity": 1 },
            ],
            "models": catalog(),
            "spools": [
                spool(BLUE, "Blue", 1000.0, true),
                spool(RED, "Red", 1000.0, true),
                spool(GREEN, "Green", 1000.0, true),
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    let spools = data["spools"].as_object().expect("spools should be a map");
    assert_eq!(spools.len(), 3);

    assert_eq!(spools[RED]["total_grams"], 70.0);
    assert_eq!(spools[RED]["model_count"], 2);
    assert_eq!(spools[BLUE]["total_grams"], 50.0);
    assert_eq!(spools[GREEN]["model_count"], 1);
    assert_eq!(data["total_grams"], 180.0);
    assert_eq!(data["warning_count"], 0);
}

// ---------------------------------------------------------------------------
// Test: low-inventory, inactive and missing spools are flagged
// ---------------------------------------------------------------------------

#[tokio::test]
async fn flags_spools_needing_attention() {
    let response = post_json(
        build_test_app(),
        URI,
        json!({
            "selections": [{ "model_id": MODEL_B, "quantity": 1 }],
            "models": catalog(),
            "spools": [spool(RED, "Red", 10.0, true)],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let spools = &json["data"]["spools"];

    assert_eq!(spools[RED]["low_inventory"], true);
    assert_eq!(spools[RED]["inactive"], false);

    assert_eq!(spools[GREEN]["spool_found"], false);
    assert_eq!(spools[GREEN]["inactive"], true);
    assert_eq!(spools[GREEN]["low_inventory"], true);

    assert_eq!(json["data"]["warning_count"], 2);
}

// ---------------------------------------------------------------------------
// Test: empty selection returns an empty map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_selection_returns_empty_map() {
    let response = post_json(
        build_test_app(),
        URI,
        json!({ "selections": [], "models": catalog() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["spools"].as_object().unwrap().is_empty());
    assert_eq!(json["data"]["total_grams"], 0.0);
}

// ---------------------------------------------------------------------------
// Test: unknown models are reported
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reports_unresolved_models() {
    let ghost = "00000000-0000-0000-0000-00000000dead";
    let response = post_json(
        build_test_app(),
        URI,
        json!({
            "selections": [{ "model_id": ghost, "quantity": 2 }],
            "models": catalog(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["unresolved_models"], json!([ghost]));
}

// ---------------------------------------------------------------------------
// Test: selection limit comes from configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_more_selections_than_configured() {
    let limit = common::test_config().max_planning_selections;
    let selections: Vec<Value> = (0..=limit)
        .map(|_| json!({ "model_id": MODEL_A, "quantity": 1 }))
        .collect();

    let response = post_json(
        build_test_app(),
        URI,
        json!({ "selections": selections, "models": catalog() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: negative BOM weights are rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_negative_bom_weight() {
    let response = post_json(
        build_test_app(),
        URI,
        json!({
            "selections": [{ "model_id": MODEL_A, "quantity": 1 }],
            "models": [{
                "id": MODEL_A,
                "name": "Broken",
                "bom": [{ "spool_id": BLUE, "weight_grams_per_unit": -5.0 }],
            }],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: negative spool stock is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejects_negative_spool_stock() {
    let response = post_json(
        build_test_app(),
        URI,
        json!({
            "selections": [{ "model_id": MODEL_A, "quantity": 1 }],
            "models": catalog(),
            "spools": [
                spool(BLUE, "Blue", 1000.0, true),
                spool(RED, "Red", -500.0, true),
            ],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("current_weight_grams"));
}
