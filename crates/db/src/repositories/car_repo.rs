//! Repository for the `cars` table.
//!
//! Cars are only ever inserted as part of a Human Being write (see
//! `HumanBeingRepo`), so this repo is read-only.

use sqlx::PgPool;

use hbm_core::types::DbId;

use crate::models::car::Car;

const COLUMNS: &str = "id, name, cool";

pub struct CarRepo;

impl CarRepo {
    /// Find a car by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1");
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cars, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars ORDER BY id ASC");
        sqlx::query_as::<_, Car>(&query).fetch_all(pool).await
    }
}
