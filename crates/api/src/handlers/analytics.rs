//! Handlers for production variance analytics.
//!
//! All three endpoints accept the same body: the list of production runs the
//! dashboard already fetched.

use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use batchivo_core::variance::{self, ProductionRunSummary};

use crate::error::AppResult;
use crate::response::DataResponse;

/// Body shared by the analytics endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct RunAnalyticsRequest {
    #[validate(length(max = 10000))]
    pub runs: Vec<ProductionRunSummary>,
}

/// POST /analytics/variance-stats
pub async fn variance_stats(
    Json(body): Json<RunAnalyticsRequest>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    let stats = variance::compute_variance_stats(&body.runs);
    tracing::debug!(
        runs = body.runs.len(),
        qualifying = stats.run_count,
        "Variance stats computed",
    );

    Ok(Json(DataResponse { data: stats }))
}

/// POST /analytics/variance-by-model
pub async fn variance_by_model(
    Json(body): Json<RunAnalyticsRequest>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    let models = variance::variance_by_model(&body.runs);
    Ok(Json(DataResponse { data: models }))
}

/// POST /analytics/estimated-vs-actual
pub async fn estimated_vs_actual(
    Json(body): Json<RunAnalyticsRequest>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    let series = variance::estimated_vs_actual_series(&body.runs);
    Ok(Json(DataResponse { data: series }))
}
