pub mod health;
pub mod human_being;
pub mod import;
pub mod special_ops;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /humanbeings                                      list, create
/// /humanbeings/count                                count (honors filter)
/// /humanbeings/cars                                 list cars
/// /humanbeings/validate                             dry-run validation
/// /humanbeings/{id}                                 get, update, delete
///
/// /import/humanbeings                               bulk import (POST)
/// /import/history                                   import attempts, newest first
/// /import/history/{id}/payload                      original import payload
///
/// /special-operations/sum-minutes-waiting            total waiting minutes
/// /special-operations/max-toothpick                  first toothpick holder
/// /special-operations/soundtrack-starts-with         prefix search (?substring=)
/// /special-operations/delete-heroes-without-toothpicks  bulk delete (DELETE)
/// /special-operations/set-all-mood-sadness           bulk update (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/humanbeings", human_being::router())
        .nest("/import", import::router())
        .nest("/special-operations", special_ops::router())
}
