//! Handlers for the `/humanbeings` resource.
//!
//! Create and update accept a raw JSON body, normalize it (MACHINE_GUN
//! impact-speed default), run the validation engine over it, and only then
//! deserialize into the typed DTO. A payload that fails validation never
//! reaches the database.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use hbm_core::error::CoreError;
use hbm_core::pagination::{clamp_page, clamp_page_size, column_expression, SortDirection};
use hbm_core::types::DbId;
use hbm_core::validation::evaluator::validate;
use hbm_core::validation::normalize::{apply_machine_gun_default, coerce_integral_floats};
use hbm_db::models::car::Car;
use hbm_db::models::human_being::{HumanBeing, NewHumanBeing};
use hbm_db::repositories::{CarRepo, HumanBeingRepo};

use crate::error::{AppError, AppResult};
use crate::query::ListParams;
use crate::response::Paginated;
use crate::state::AppState;

/// Normalize and validate a raw record, then deserialize it into the typed
/// DTO. Validation failures surface as [`AppError::Validation`].
fn prepare_input(body: Value) -> Result<NewHumanBeing, AppError> {
    let Value::Object(mut record) = body else {
        return Err(AppError::BadRequest(
            "Expected a JSON object".to_string(),
        ));
    };
    apply_machine_gun_default(&mut record);
    coerce_integral_floats(&mut record);
    let violations = validate(&record);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }
    // The engine has accepted every field and integer-typed fields have
    // been coerced, so this only fails on shapes the engine does not
    // police (e.g. unexpected payload nesting).
    serde_json::from_value(Value::Object(record))
        .map_err(|e| AppError::BadRequest(format!("Malformed HumanBeing payload: {e}")))
}

/// Reject the write if another row already occupies the coordinates.
/// The `uq_human_beings_coordinates` constraint backstops this check.
async fn ensure_coordinates_free(
    state: &AppState,
    input: &NewHumanBeing,
    exclude: Option<DbId>,
) -> Result<(), AppError> {
    let occupied =
        HumanBeingRepo::find_id_by_coordinates(&state.pool, input.coordinates.x, input.coordinates.y)
            .await?;
    if let Some(existing) = occupied {
        if Some(existing) != exclude {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "A HumanBeing already occupies coordinates ({}, {})",
                input.coordinates.x, input.coordinates.y
            ))));
        }
    }
    Ok(())
}

/// Verify an existing-car reference before opening the write transaction,
/// so the client gets a targeted 404 instead of a generic one.
async fn ensure_car_exists(state: &AppState, input: &NewHumanBeing) -> Result<(), AppError> {
    if let Some(car_id) = input.car.id {
        CarRepo::find_by_id(&state.pool, car_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Car",
                id: car_id,
            }))?;
    }
    Ok(())
}

/// Resolve `filterColumn` / `filterValue` into a whitelisted SQL expression
/// plus the value to match.
fn resolve_filter(params: &ListParams) -> Result<Option<(&'static str, String)>, AppError> {
    let Some(column) = params.filter_column.as_deref() else {
        return Ok(None);
    };
    let expr = column_expression(column)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown filter column: {column}")))?;
    let value = params
        .filter_value
        .clone()
        .ok_or_else(|| AppError::BadRequest("filterValue is required when filterColumn is set".to_string()))?;
    Ok(Some((expr, value)))
}

fn resolve_sort(params: &ListParams) -> Result<Option<(&'static str, SortDirection)>, AppError> {
    let Some(column) = params.sort_column.as_deref() else {
        return Ok(None);
    };
    let expr = column_expression(column)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown sort column: {column}")))?;
    Ok(Some((expr, SortDirection::parse(params.sort_direction.as_deref()))))
}

/// GET /api/v1/humanbeings
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<HumanBeing>>> {
    let page = clamp_page(params.page);
    let size = clamp_page_size(params.size);
    let filter = resolve_filter(&params)?;
    let sort = resolve_sort(&params)?;

    let filter_ref = filter.as_ref().map(|(expr, value)| (*expr, value.as_str()));
    let rows = HumanBeingRepo::list(&state.pool, page, size, filter_ref, sort).await?;
    let total_count = HumanBeingRepo::count(&state.pool, filter_ref).await?;

    Ok(Json(Paginated {
        data: rows.into_iter().map(HumanBeing::from).collect(),
        total_count,
        page,
        size,
    }))
}

/// GET /api/v1/humanbeings/count
pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Value>> {
    let filter = resolve_filter(&params)?;
    let filter_ref = filter.as_ref().map(|(expr, value)| (*expr, value.as_str()));
    let count = HumanBeingRepo::count(&state.pool, filter_ref).await?;
    Ok(Json(json!({ "count": count })))
}

/// GET /api/v1/humanbeings/cars
pub async fn list_cars(State(state): State<AppState>) -> AppResult<Json<Vec<Car>>> {
    let cars = CarRepo::list(&state.pool).await?;
    Ok(Json(cars))
}

/// POST /api/v1/humanbeings/validate
///
/// Dry-run: normalize and validate the record without writing anything.
pub async fn validate_record(Json(body): Json<Value>) -> AppResult<Json<Value>> {
    let Value::Object(mut record) = body else {
        return Err(AppError::BadRequest("Expected a JSON object".to_string()));
    };
    apply_machine_gun_default(&mut record);
    let violations = validate(&record);
    Ok(Json(json!({
        "valid": violations.is_empty(),
        "violations": violations,
    })))
}

/// GET /api/v1/humanbeings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<HumanBeing>> {
    let row = HumanBeingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HumanBeing",
            id,
        }))?;
    Ok(Json(HumanBeing::from(row)))
}

/// POST /api/v1/humanbeings
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<HumanBeing>)> {
    let input = prepare_input(body)?;
    ensure_car_exists(&state, &input).await?;
    ensure_coordinates_free(&state, &input, None).await?;
    let row = HumanBeingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(HumanBeing::from(row))))
}

/// PUT /api/v1/humanbeings/{id}
///
/// Full replace: the body is validated exactly like on create.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<Json<HumanBeing>> {
    let input = prepare_input(body)?;
    ensure_car_exists(&state, &input).await?;
    ensure_coordinates_free(&state, &input, Some(id)).await?;
    let row = HumanBeingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HumanBeing",
            id,
        }))?;
    Ok(Json(HumanBeing::from(row)))
}

/// DELETE /api/v1/humanbeings/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HumanBeingRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "HumanBeing",
            id,
        }))
    }
}
