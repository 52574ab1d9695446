//! Bulk import history models.

use hbm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An `import_history` row, minus the (potentially large) payload column.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHistory {
    pub id: DbId,
    /// `SUCCESS` or `FAILED`.
    pub status: String,
    pub username: String,
    pub added_count: i32,
    pub total_processed: i32,
    pub failed_count: i32,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording an import attempt.
#[derive(Debug, Clone)]
pub struct NewImportHistory {
    pub status: String,
    pub username: String,
    pub added_count: i32,
    pub total_processed: i32,
    pub failed_count: i32,
    pub error_message: Option<String>,
    pub payload: serde_json::Value,
}
