//! Handlers for production run material planning.
//!
//! The client sends the models it selected, their BOMs and the spool
//! snapshot it is displaying; the response is the per-spool demand with
//! low-inventory and inactive warnings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use batchivo_core::inventory::SpoolSnapshot;
use batchivo_core::material_suggestion::{
    self, MaterialSuggestions, ModelBom, ModelSelection,
};
use batchivo_core::threshold_validation::validate_max_count;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /planning/material-suggestions`.
#[derive(Debug, Deserialize, Validate)]
pub struct MaterialSuggestionRequest {
    pub selections: Vec<ModelSelection>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub models: Vec<ModelBom>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub spools: Vec<SpoolSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct MaterialSuggestionResponse {
    #[serde(flatten)]
    pub suggestions: MaterialSuggestions,
    pub total_grams: f64,
    pub warning_count: usize,
}

// ---------------------------------------------------------------------------
// POST /planning/material-suggestions
// ---------------------------------------------------------------------------

/// Aggregate spool demand for the selected models.
///
/// An empty selection list is valid and yields an empty suggestion map.
pub async fn material_suggestions(
    State(state): State<AppState>,
    Json(body): Json<MaterialSuggestionRequest>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;

    validate_max_count(
        body.selections.len(),
        state.config.max_planning_selections,
        "Material planning",
    )?;
    material_suggestion::validate_boms(&body.models)?;
    for spool in &body.spools {
        spool.validate()?;
    }

    let suggestions =
        material_suggestion::aggregate_materials(&body.selections, &body.models, &body.spools);

    let warning_count = suggestions.warnings().count();
    if !suggestions.unresolved_models.is_empty() {
        tracing::warn!(
            unresolved = suggestions.unresolved_models.len(),
            "Material planning referenced models without a BOM",
        );
    }
    tracing::debug!(
        selections = body.selections.len(),
        spools = suggestions.len(),
        warning_count,
        "Material suggestions computed",
    );

    Ok(Json(DataResponse {
        data: MaterialSuggestionResponse {
            total_grams: suggestions.total_grams(),
            warning_count,
            suggestions,
        },
    }))
}
