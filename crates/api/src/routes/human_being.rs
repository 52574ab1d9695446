//! Route definitions for the `/humanbeings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::human_being;
use crate::state::AppState;

/// Routes mounted at `/humanbeings`.
///
/// ```text
/// GET    /           -> list       (?page, ?size, ?filterColumn, ?filterValue,
///                                   ?sortColumn, ?sortDirection)
/// POST   /           -> create
/// GET    /count      -> count      (same filter params as list)
/// GET    /cars       -> list_cars
/// POST   /validate   -> validate_record  (dry-run)
/// GET    /{id}       -> get_by_id
/// PUT    /{id}       -> update
/// DELETE /{id}       -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(human_being::list).post(human_being::create))
        .route("/count", get(human_being::count))
        .route("/cars", get(human_being::list_cars))
        .route("/validate", post(human_being::validate_record))
        .route(
            "/{id}",
            get(human_being::get_by_id)
                .put(human_being::update)
                .delete(human_being::delete),
        )
}
