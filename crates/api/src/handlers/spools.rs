//! Handlers for spool inventory transactions.

use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use batchivo_core::inventory::{self, SpoolSnapshot, TransactionType};
use batchivo_core::types::EntityId;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Body of `POST /spools/transactions`.
#[derive(Debug, Deserialize, Validate)]
pub struct SpoolTransactionRequest {
    pub spool: SpoolSnapshot,
    pub transaction_type: TransactionType,
    /// Magnitude for purchases/usages, signed delta for adjustments.
    #[validate(range(min = -1_000_000.0, max = 1_000_000.0))]
    pub grams: f64,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SpoolTransactionResponse {
    pub spool_id: EntityId,
    pub transaction_type: TransactionType,
    pub previous_weight_grams: f64,
    pub new_weight_grams: f64,
    pub remaining_percentage: f64,
}

/// Compute a spool's weight after the transaction.
///
/// The spool snapshot is not stored; the caller persists the new weight.
pub async fn apply_transaction(
    Json(body): Json<SpoolTransactionRequest>,
) -> AppResult<impl IntoResponse> {
    body.validate()?;
    body.spool.validate()?;

    let new_weight =
        inventory::apply_transaction(&body.spool, body.transaction_type, body.grams)?;

    let updated = SpoolSnapshot {
        current_weight_grams: new_weight,
        ..body.spool.clone()
    };

    tracing::info!(
        spool_id = %body.spool.id,
        kind = body.transaction_type.label(),
        grams = body.grams,
        new_weight,
        "Spool transaction applied",
    );

    Ok(Json(DataResponse {
        data: SpoolTransactionResponse {
            spool_id: body.spool.id,
            transaction_type: body.transaction_type,
            previous_weight_grams: body.spool.current_weight_grams,
            new_weight_grams: new_weight,
            remaining_percentage: updated.remaining_percentage(),
        },
    }))
}
