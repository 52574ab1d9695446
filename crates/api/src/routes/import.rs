//! Route definitions for the `/import` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::import;
use crate::state::AppState;

/// Routes mounted at `/import`.
///
/// ```text
/// POST   /humanbeings              -> import_human_beings (all-or-nothing)
/// GET    /history                  -> list_history
/// GET    /history/{id}/payload     -> get_payload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/humanbeings", post(import::import_human_beings))
        .route("/history", get(import::list_history))
        .route("/history/{id}/payload", get(import::get_payload))
}
