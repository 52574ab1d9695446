//! Handlers for the `/import` resource.
//!
//! Bulk import is all-or-nothing: every record in the file is normalized
//! and validated up front, coordinate clashes (within the file and against
//! stored rows) are checked, and only a fully clean batch is inserted, in
//! one transaction. Every attempt, successful or not, leaves an
//! `import_history` row carrying the original payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use hbm_core::error::CoreError;
use hbm_core::import::first_duplicate_coordinates;
use hbm_core::types::DbId;
use hbm_core::validation::evaluator::validate;
use hbm_core::validation::normalize::{apply_machine_gun_default, coerce_integral_floats};
use hbm_db::models::human_being::NewHumanBeing;
use hbm_db::models::import_history::{ImportHistory, NewImportHistory};
use hbm_db::repositories::{HumanBeingRepo, ImportHistoryRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const STATUS_SUCCESS: &str = "SUCCESS";
const STATUS_FAILED: &str = "FAILED";

/// Counts reported after a committed import.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportOutcome {
    imported: usize,
    total_processed: usize,
    failed: usize,
}

/// Validate the whole file and collect row-numbered error messages.
/// Rows are numbered from 1 to match what the operator sees in the file.
fn check_records(raw_records: &[Value]) -> (Vec<NewHumanBeing>, Vec<String>) {
    let mut inputs = Vec::with_capacity(raw_records.len());
    let mut errors = Vec::new();

    for (idx, raw) in raw_records.iter().enumerate() {
        let row = idx + 1;
        let Value::Object(record) = raw else {
            errors.push(format!("Row {row}: expected a JSON object"));
            continue;
        };
        let mut record = record.clone();
        apply_machine_gun_default(&mut record);
        coerce_integral_floats(&mut record);
        let violations = validate(&record);
        if !violations.is_empty() {
            for (field, message) in &violations {
                errors.push(format!("Row {row}: {field}: {message}"));
            }
            continue;
        }
        match serde_json::from_value::<NewHumanBeing>(Value::Object(record)) {
            Ok(input) => inputs.push(input),
            Err(e) => errors.push(format!("Row {row}: malformed record: {e}")),
        }
    }

    (inputs, errors)
}

async fn record_history(
    state: &AppState,
    status: &str,
    added: usize,
    total: usize,
    error_message: Option<String>,
    payload: Value,
) -> Result<(), sqlx::Error> {
    let failed = total - added;
    let entry = NewImportHistory {
        status: status.to_string(),
        username: state.config.import_username.clone(),
        added_count: added as i32,
        total_processed: total as i32,
        failed_count: failed as i32,
        error_message,
        payload,
    };
    ImportHistoryRepo::create(&state.pool, &entry).await?;
    Ok(())
}

/// Record a failed attempt. Never masks the import error being reported,
/// so a history write failure is only logged.
async fn record_failure(state: &AppState, total: usize, message: String, payload: Value) {
    if let Err(e) = record_history(state, STATUS_FAILED, 0, total, Some(message), payload).await {
        tracing::warn!(error = %e, "Failed to record import history entry");
    }
}

/// POST /api/v1/import/humanbeings
pub async fn import_human_beings(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let Value::Array(raw_records) = body else {
        return Err(AppError::BadRequest(
            "Expected a JSON array of HumanBeing records".to_string(),
        ));
    };
    if raw_records.is_empty() {
        return Err(AppError::BadRequest(
            "No HumanBeing records provided".to_string(),
        ));
    }

    let total = raw_records.len();
    let payload = Value::Array(raw_records.clone());
    let (inputs, mut errors) = check_records(&raw_records);

    // Coordinate uniqueness: only meaningful once every row parsed, since
    // row numbers in `inputs` line up with the file only in that case.
    if errors.is_empty() {
        let coords: Vec<(i32, f64)> = inputs
            .iter()
            .map(|i| (i.coordinates.x, i.coordinates.y))
            .collect();
        if let Some((first, second)) = first_duplicate_coordinates(&coords) {
            errors.push(format!(
                "Rows {first} and {second} share the same coordinates"
            ));
        }
    }
    if errors.is_empty() {
        for (idx, input) in inputs.iter().enumerate() {
            let occupied = HumanBeingRepo::find_id_by_coordinates(
                &state.pool,
                input.coordinates.x,
                input.coordinates.y,
            )
            .await?;
            if occupied.is_some() {
                errors.push(format!(
                    "Row {}: coordinates ({}, {}) are already taken",
                    idx + 1,
                    input.coordinates.x,
                    input.coordinates.y
                ));
            }
        }
    }

    if !errors.is_empty() {
        tracing::info!(total, errors = errors.len(), "Import rejected");
        record_failure(&state, total, errors.join("; "), payload).await;
        let body = json!({
            "error": "Import rejected; no records were added",
            "code": "IMPORT_FAILED",
            "errors": errors,
        });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    match HumanBeingRepo::create_batch(&state.pool, &inputs).await {
        Ok(rows) => {
            let added = rows.len();
            record_history(&state, STATUS_SUCCESS, added, total, None, payload).await?;
            tracing::info!(added, "Import committed");
            let outcome = ImportOutcome {
                imported: added,
                total_processed: total,
                failed: 0,
            };
            Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })).into_response())
        }
        Err(err) => {
            record_failure(&state, total, format!("Batch insert failed: {err}"), payload).await;
            Err(AppError::Database(err))
        }
    }
}

/// GET /api/v1/import/history
pub async fn list_history(State(state): State<AppState>) -> AppResult<Json<Vec<ImportHistory>>> {
    let history = ImportHistoryRepo::list(&state.pool).await?;
    Ok(Json(history))
}

/// GET /api/v1/import/history/{id}/payload
///
/// Return the original JSON payload of one import attempt.
pub async fn get_payload(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let payload = ImportHistoryRepo::get_payload(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ImportHistory",
            id,
        }))?;
    Ok(Json(payload))
}
