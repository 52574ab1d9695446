//! Repository for the `import_history` table.

use sqlx::PgPool;

use hbm_core::types::DbId;

use crate::models::import_history::{ImportHistory, NewImportHistory};

/// Column list for history queries. Excludes `payload`, which is fetched
/// separately on demand.
const COLUMNS: &str =
    "id, status, username, added_count, total_processed, failed_count, error_message, created_at";

/// Records and lists bulk import attempts.
pub struct ImportHistoryRepo;

impl ImportHistoryRepo {
    /// Record an import attempt (successful or failed).
    pub async fn create(
        pool: &PgPool,
        input: &NewImportHistory,
    ) -> Result<ImportHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO import_history \
                (status, username, added_count, total_processed, failed_count, \
                 error_message, payload) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportHistory>(&query)
            .bind(&input.status)
            .bind(&input.username)
            .bind(input.added_count)
            .bind(input.total_processed)
            .bind(input.failed_count)
            .bind(&input.error_message)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// List all import attempts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ImportHistory>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM import_history ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ImportHistory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch the original payload of one import attempt.
    pub async fn get_payload(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT payload FROM import_history WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
