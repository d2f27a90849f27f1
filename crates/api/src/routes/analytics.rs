//! Route definitions for production variance analytics.

use axum::routing::post;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Analytics routes mounted at `/analytics`.
///
/// ```text
/// POST /variance-stats         -> variance_stats
/// POST /variance-by-model      -> variance_by_model
/// POST /estimated-vs-actual    -> estimated_vs_actual
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/variance-stats", post(analytics::variance_stats))
        .route("/variance-by-model", post(analytics::variance_by_model))
        .route("/estimated-vs-actual", post(analytics::estimated_vs_actual))
}
