//! Route definitions for the `/special-operations` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::special_ops;
use crate::state::AppState;

/// Routes mounted at `/special-operations`.
///
/// ```text
/// GET    /sum-minutes-waiting               -> sum_minutes_waiting
/// GET    /max-toothpick                     -> max_toothpick
/// GET    /soundtrack-starts-with            -> soundtrack_starts_with (?substring=)
/// DELETE /delete-heroes-without-toothpicks  -> delete_heroes_without_toothpicks
/// PUT    /set-all-mood-sadness              -> set_all_mood_sadness
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sum-minutes-waiting",
            get(special_ops::sum_minutes_waiting),
        )
        .route("/max-toothpick", get(special_ops::max_toothpick))
        .route(
            "/soundtrack-starts-with",
            get(special_ops::soundtrack_starts_with),
        )
        .route(
            "/delete-heroes-without-toothpicks",
            delete(special_ops::delete_heroes_without_toothpicks),
        )
        .route(
            "/set-all-mood-sadness",
            put(special_ops::set_all_mood_sadness),
        )
}
