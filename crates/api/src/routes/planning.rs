//! Route definitions for production run material planning.

use axum::routing::post;
use axum::Router;

use crate::handlers::planning;
use crate::state::AppState;

/// Planning routes mounted at `/planning`.
///
/// ```text
/// POST /material-suggestions   -> material_suggestions
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/material-suggestions",
        post(planning::material_suggestions),
    )
}
