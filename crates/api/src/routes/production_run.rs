//! Route definitions for production run rules.
//!
//! ```text
//! POST /variance        compute_variance
//! POST /transition      check_transition
//! POST /update-check    check_update
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::production_run;
use crate::state::AppState;

/// Production run routes mounted at `/production-runs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/variance", post(production_run::compute_variance))
        .route("/transition", post(production_run::check_transition))
        .route("/update-check", post(production_run::check_update))
}
