//! Car entity model.

use hbm_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A car row from the `cars` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Car {
    pub id: DbId,
    pub name: Option<String>,
    pub cool: bool,
}
