//! Handlers for the `/special-operations` resource: aggregate queries and
//! bulk mutations over the whole Human Being collection.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};

use hbm_db::models::human_being::HumanBeing;
use hbm_db::repositories::HumanBeingRepo;

use crate::error::{AppError, AppResult};
use crate::query::SubstringParams;
use crate::state::AppState;

/// GET /api/v1/special-operations/sum-minutes-waiting
pub async fn sum_minutes_waiting(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let sum = HumanBeingRepo::sum_minutes_waiting(&state.pool).await?;
    Ok(Json(json!({ "sum": sum })))
}

/// GET /api/v1/special-operations/max-toothpick
///
/// Returns the toothpick-holder with the smallest id, or 404 if nobody
/// holds one.
pub async fn max_toothpick(State(state): State<AppState>) -> AppResult<Json<HumanBeing>> {
    let row = HumanBeingRepo::max_toothpick(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No HumanBeing holding a toothpick".to_string()))?;
    Ok(Json(HumanBeing::from(row)))
}

/// GET /api/v1/special-operations/soundtrack-starts-with?substring=
pub async fn soundtrack_starts_with(
    State(state): State<AppState>,
    Query(params): Query<SubstringParams>,
) -> AppResult<Json<Vec<HumanBeing>>> {
    let prefix = params.substring.as_deref().unwrap_or("");
    if prefix.is_empty() {
        return Err(AppError::BadRequest(
            "substring query parameter must not be empty".to_string(),
        ));
    }
    let rows = HumanBeingRepo::soundtrack_starts_with(&state.pool, prefix).await?;
    Ok(Json(rows.into_iter().map(HumanBeing::from).collect()))
}

/// DELETE /api/v1/special-operations/delete-heroes-without-toothpicks
pub async fn delete_heroes_without_toothpicks(
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let deleted = HumanBeingRepo::delete_heroes_without_toothpicks(&state.pool).await?;
    tracing::info!(deleted, "Deleted heroes without toothpicks");
    Ok(Json(json!({ "deleted": deleted })))
}

/// PUT /api/v1/special-operations/set-all-mood-sadness
pub async fn set_all_mood_sadness(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let updated = HumanBeingRepo::set_all_mood_sadness(&state.pool).await?;
    tracing::info!(updated, "Set all real heroes' mood to SADNESS");
    Ok(Json(json!({ "updated": updated })))
}
