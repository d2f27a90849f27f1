use axum::routing::post;
use axum::Router;

use crate::handlers::spools;
use crate::state::AppState;

/// Spool routes mounted at `/spools`.
pub fn router() -> Router<AppState> {
    Router::new().route("/transactions", post(spools::apply_transaction))
}
