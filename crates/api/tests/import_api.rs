//! HTTP-level integration tests for the `/import` API endpoints.
//!
//! The import is all-or-nothing: a single bad record must prevent every
//! record in the file from being written, and every attempt must leave an
//! import history row either way.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, human_payload, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn count(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/humanbeings/count").await).await;
    json["count"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Successful import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_clean_batch(pool: PgPool) {
    let batch = json!([
        human_payload("One", 1, 1.0),
        human_payload("Two", 2, 2.0),
    ]);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/import/humanbeings", batch).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["imported"], 2);
    assert_eq!(json["data"]["totalProcessed"], 2);
    assert_eq!(json["data"]["failed"], 0);

    assert_eq!(count(&pool).await, 2);

    // History records the success.
    let app = common::build_test_app(pool);
    let history = body_json(get(app, "/api/v1/import/history").await).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "SUCCESS");
    assert_eq!(entries[0]["addedCount"], 2);
    assert_eq!(entries[0]["totalProcessed"], 2);
    assert_eq!(entries[0]["failedCount"], 0);
    assert_eq!(entries[0]["username"], "tester");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_applies_machine_gun_default(pool: PgPool) {
    let mut record = human_payload("Gunner", 3, 3.0);
    record["weaponType"] = json!("MACHINE_GUN");
    record["impactSpeed"] = json!(0);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/import/humanbeings", json!([record])).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/api/v1/humanbeings").await).await;
    assert_eq!(list["data"][0]["impactSpeed"], 20.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_accepts_integral_floats_on_integer_fields(pool: PgPool) {
    let mut record = human_payload("Floaty", 12, 12.5);
    record["coordinates"]["x"] = json!(12.0);
    record["minutesOfWaiting"] = json!(3.0);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/import/humanbeings", json!([record])).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(count(&pool).await, 1);

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/api/v1/humanbeings").await).await;
    assert_eq!(list["data"][0]["coordinates"]["x"], 12);
    assert_eq!(list["data"][0]["minutesOfWaiting"], 3);
}

// ---------------------------------------------------------------------------
// Rejected imports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_is_atomic_on_invalid_record(pool: PgPool) {
    let mut bad = human_payload("Bad", 5, 5.0);
    bad["coordinates"]["x"] = json!(0);
    let batch = json!([human_payload("Good", 4, 4.0), bad]);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/import/humanbeings", batch).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "IMPORT_FAILED");
    let errors = json["errors"].as_array().unwrap();
    assert!(
        errors.iter().any(|e| e.as_str().unwrap().starts_with("Row 2:")),
        "errors should name the offending row, got: {errors:?}"
    );

    // The valid record must not have been written either.
    assert_eq!(count(&pool).await, 0);

    // The failed attempt still shows up in history.
    let app = common::build_test_app(pool);
    let history = body_json(get(app, "/api/v1/import/history").await).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "FAILED");
    assert_eq!(entries[0]["addedCount"], 0);
    assert!(entries[0]["errorMessage"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_rejects_in_batch_duplicate_coordinates(pool: PgPool) {
    let batch = json!([
        human_payload("One", 6, 6.0),
        human_payload("Clone", 6, 6.0),
    ]);

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/import/humanbeings", batch).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_rejects_coordinates_already_stored(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/humanbeings", human_payload("Resident", 7, 7.0)).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/import/humanbeings",
        json!([human_payload("Invader", 7, 7.0)]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert!(errors[0].as_str().unwrap().contains("already taken"));

    assert_eq!(count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_empty_array_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/import/humanbeings", json!([])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_import_non_array_body_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/import/humanbeings",
        human_payload("Lonely", 8, 8.0),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// History payloads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_payload_returns_original_file(pool: PgPool) {
    let batch = json!([human_payload("Archived", 9, 9.0)]);

    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/import/humanbeings", batch.clone()).await;

    let app = common::build_test_app(pool.clone());
    let history = body_json(get(app, "/api/v1/import/history").await).await;
    let id = history[0]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/import/history/{id}/payload")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(payload, batch);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_payload_for_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/import/history/999999/payload").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_is_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/import/humanbeings",
        json!([human_payload("Earlier", 10, 10.0)]),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/import/humanbeings",
        json!([human_payload("Later", 11, 11.0)]),
    )
    .await;

    let app = common::build_test_app(pool);
    let history = body_json(get(app, "/api/v1/import/history").await).await;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["id"].as_i64().unwrap() > entries[1]["id"].as_i64().unwrap());
}
