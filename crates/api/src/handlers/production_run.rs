//! Handlers for production run rules.
//!
//! Provides weight/variance computation for a run's recorded weights and
//! pre-flight checks for status transitions and field edits, so the form
//! can lock fields before the backend would reject the update.

use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use batchivo_core::production_run::{
    self, editable_fields, RunField, RunStatus, RunVariance, RunWeights, ALL_RUN_FIELDS,
};
use batchivo_core::threshold_validation::validate_count_range;

use crate::error::AppResult;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RunVarianceResponse {
    pub estimated_total_grams: f64,
    /// `None` until model, flushed and tower actuals are all recorded.
    pub actual_total_grams: Option<f64>,
    pub variance: Option<RunVariance>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub from: RunStatus,
    pub to: RunStatus,
}

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub from: RunStatus,
    pub to: RunStatus,
    /// Fields still editable after the transition.
    pub editable_fields: &'static [RunField],
}

#[derive(Debug, Deserialize)]
pub struct UpdateCheckRequest {
    pub status: RunStatus,
    pub fields: Vec<RunField>,
}

#[derive(Debug, Serialize)]
pub struct UpdateCheckResponse {
    pub status: RunStatus,
    pub fields: Vec<RunField>,
}

// ---------------------------------------------------------------------------
// POST /production-runs/variance
// ---------------------------------------------------------------------------

/// Compute estimated/actual totals and variance from component weights.
pub async fn compute_variance(Json(weights): Json<RunWeights>) -> AppResult<impl IntoResponse> {
    weights.validate()?;

    let response = RunVarianceResponse {
        estimated_total_grams: weights.estimated_total(),
        actual_total_grams: weights.actual_total(),
        variance: weights.variance(),
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// POST /production-runs/transition
// ---------------------------------------------------------------------------

/// Check a status change. Illegal transitions return 409.
pub async fn check_transition(
    Json(body): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    production_run::validate_transition(body.from, body.to)?;

    tracing::debug!(from = %body.from, to = %body.to, "Run status transition accepted");

    Ok(Json(DataResponse {
        data: TransitionResponse {
            from: body.from,
            to: body.to,
            editable_fields: editable_fields(body.to),
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /production-runs/update-check
// ---------------------------------------------------------------------------

/// Check that every submitted field is editable in the run's status.
///
/// Repeated fields are collapsed before the count limit applies.
pub async fn check_update(Json(body): Json<UpdateCheckRequest>) -> AppResult<impl IntoResponse> {
    let mut fields: Vec<RunField> = Vec::with_capacity(body.fields.len());
    for field in body.fields {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    validate_count_range(fields.len(), ALL_RUN_FIELDS.len(), "Production run update")?;
    production_run::validate_update(body.status, &fields)?;

    Ok(Json(DataResponse {
        data: UpdateCheckResponse {
            status: body.status,
            fields,
        },
    }))
}
