pub mod analytics;
pub mod health;
pub mod planning;
pub mod production_run;
pub mod spools;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /planning/material-suggestions             aggregate spool demand (POST)
///
/// /analytics/variance-stats                  variance summary (POST)
/// /analytics/variance-by-model               per-model variance (POST)
/// /analytics/estimated-vs-actual             chart series (POST)
///
/// /production-runs/variance                  weights -> totals + variance (POST)
/// /production-runs/transition                check status change (POST)
/// /production-runs/update-check              check editable fields (POST)
///
/// /spools/transactions                       apply inventory transaction (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/planning", planning::router())
        .nest("/analytics", analytics::router())
        .nest("/production-runs", production_run::router())
        .nest("/spools", spools::router())
}
