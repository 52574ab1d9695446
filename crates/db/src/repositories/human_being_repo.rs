//! Repository for the `human_beings` table.

use sqlx::{PgPool, Postgres, Transaction};

use hbm_core::entity::Mood;
use hbm_core::pagination::SortDirection;
use hbm_core::types::DbId;

use crate::models::human_being::{HumanBeingRow, NewHumanBeing};

/// Column list shared across queries. `h` aliases `human_beings`, `c` the
/// joined `cars` row; the `car_*` aliases match `HumanBeingRow` fields.
const COLUMNS: &str = "h.id, h.name, h.x, h.y, h.creation_date, h.real_hero, h.has_toothpick, \
     h.mood, h.impact_speed, h.soundtrack_name, h.minutes_of_waiting, h.weapon_type, \
     c.id AS car_id, c.name AS car_name, c.cool AS car_cool";

const FROM_JOINED: &str = "FROM human_beings h JOIN cars c ON c.id = h.car_id";

/// Escape LIKE metacharacters so a prefix is matched literally.
fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Provides CRUD, listing, and bulk operations for Human Beings.
pub struct HumanBeingRepo;

impl HumanBeingRepo {
    /// Insert one Human Being (and its inline car, if any) atomically,
    /// returning the created row.
    pub async fn create(pool: &PgPool, input: &NewHumanBeing) -> Result<HumanBeingRow, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let row = Self::create_in_tx(&mut tx, input).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Insert a whole batch in a single transaction. Any failure rolls the
    /// entire batch back.
    pub async fn create_batch(
        pool: &PgPool,
        inputs: &[NewHumanBeing],
    ) -> Result<Vec<HumanBeingRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            rows.push(Self::create_in_tx(&mut tx, input).await?);
        }
        tx.commit().await?;
        Ok(rows)
    }

    async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewHumanBeing,
    ) -> Result<HumanBeingRow, sqlx::Error> {
        let car_id = Self::resolve_car(tx, input).await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO human_beings \
                (name, x, y, real_hero, has_toothpick, car_id, mood, impact_speed, \
                 soundtrack_name, minutes_of_waiting, weapon_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.coordinates.x)
        .bind(input.coordinates.y)
        .bind(input.real_hero)
        .bind(input.has_toothpick)
        .bind(car_id)
        .bind(input.mood.as_str())
        .bind(input.impact_speed)
        .bind(&input.soundtrack_name)
        .bind(input.minutes_of_waiting)
        .bind(input.weapon_type.as_str())
        .fetch_one(&mut **tx)
        .await?;

        Self::fetch_by_id(&mut **tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Resolve the car reference: an existing id must point at a real row
    /// (`RowNotFound` otherwise); inline fields insert a fresh car.
    async fn resolve_car(
        tx: &mut Transaction<'_, Postgres>,
        input: &NewHumanBeing,
    ) -> Result<DbId, sqlx::Error> {
        match input.car.id {
            Some(id) => {
                sqlx::query_scalar::<_, DbId>("SELECT id FROM cars WHERE id = $1")
                    .bind(id)
                    .fetch_one(&mut **tx)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, DbId>(
                    "INSERT INTO cars (name, cool) VALUES ($1, $2) RETURNING id",
                )
                .bind(&input.car.name)
                .bind(input.car.cool.unwrap_or(false))
                .fetch_one(&mut **tx)
                .await
            }
        }
    }

    async fn fetch_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<HumanBeingRow>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} {FROM_JOINED} WHERE h.id = $1");
        sqlx::query_as::<_, HumanBeingRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a Human Being by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HumanBeingRow>, sqlx::Error> {
        Self::fetch_by_id(pool, id).await
    }

    /// Return the id of the row occupying a coordinate pair, if any.
    pub async fn find_id_by_coordinates(
        pool: &PgPool,
        x: i32,
        y: f64,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM human_beings WHERE x = $1 AND y = $2")
            .bind(x)
            .bind(y)
            .fetch_optional(pool)
            .await
    }

    /// Page through Human Beings with an optional equality filter and sort.
    ///
    /// `filter` and `sort` carry SQL expressions resolved from the column
    /// whitelist in `hbm_core::pagination`; raw client input never reaches
    /// this function.
    pub async fn list(
        pool: &PgPool,
        page: i64,
        size: i64,
        filter: Option<(&'static str, &str)>,
        sort: Option<(&'static str, SortDirection)>,
    ) -> Result<Vec<HumanBeingRow>, sqlx::Error> {
        let order_clause = match sort {
            Some((expr, dir)) => format!("{expr} {}, h.id ASC", dir.as_sql()),
            None => "h.id ASC".to_string(),
        };
        // page and size are client-controlled; an absurd page must not
        // overflow the i64 offset.
        let offset = page.saturating_mul(size);
        match filter {
            Some((expr, value)) => {
                let query = format!(
                    "SELECT {COLUMNS} {FROM_JOINED} WHERE {expr}::TEXT = $1 \
                     ORDER BY {order_clause} LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, HumanBeingRow>(&query)
                    .bind(value)
                    .bind(size)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} {FROM_JOINED} \
                     ORDER BY {order_clause} LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, HumanBeingRow>(&query)
                    .bind(size)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count rows, honoring the same optional filter as `list`.
    pub async fn count(
        pool: &PgPool,
        filter: Option<(&'static str, &str)>,
    ) -> Result<i64, sqlx::Error> {
        match filter {
            Some((expr, value)) => {
                let query =
                    format!("SELECT COUNT(*) {FROM_JOINED} WHERE {expr}::TEXT = $1");
                sqlx::query_scalar::<_, i64>(&query)
                    .bind(value)
                    .fetch_one(pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM human_beings")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Full-replace update. Returns `None` if no row with the given `id`
    /// exists; the car reference is re-resolved like on create.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewHumanBeing,
    ) -> Result<Option<HumanBeingRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let car_id = Self::resolve_car(&mut tx, input).await?;
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE human_beings SET \
                name = $2, x = $3, y = $4, real_hero = $5, has_toothpick = $6, \
                car_id = $7, mood = $8, impact_speed = $9, soundtrack_name = $10, \
                minutes_of_waiting = $11, weapon_type = $12 \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.coordinates.x)
        .bind(input.coordinates.y)
        .bind(input.real_hero)
        .bind(input.has_toothpick)
        .bind(car_id)
        .bind(input.mood.as_str())
        .bind(input.impact_speed)
        .bind(&input.soundtrack_name)
        .bind(input.minutes_of_waiting)
        .bind(input.weapon_type.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };
        let row = Self::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(Some(row))
    }

    /// Delete a Human Being by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM human_beings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Special operations ───────────────────────────────────────────

    /// Sum of `minutes_of_waiting` over all rows; 0 when the table is empty.
    pub async fn sum_minutes_waiting(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(minutes_of_waiting), 0)::BIGINT FROM human_beings",
        )
        .fetch_one(pool)
        .await
    }

    /// The toothpick-holder with the smallest id, if any.
    pub async fn max_toothpick(pool: &PgPool) -> Result<Option<HumanBeingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM_JOINED} \
             WHERE h.has_toothpick = TRUE ORDER BY h.id ASC LIMIT 1"
        );
        sqlx::query_as::<_, HumanBeingRow>(&query)
            .fetch_optional(pool)
            .await
    }

    /// All rows whose soundtrack name starts with the given prefix
    /// (literal match, LIKE metacharacters escaped).
    pub async fn soundtrack_starts_with(
        pool: &PgPool,
        prefix: &str,
    ) -> Result<Vec<HumanBeingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM_JOINED} \
             WHERE h.soundtrack_name LIKE $1 ORDER BY h.id ASC"
        );
        sqlx::query_as::<_, HumanBeingRow>(&query)
            .bind(format!("{}%", escape_like(prefix)))
            .fetch_all(pool)
            .await
    }

    /// Delete every real hero that has no toothpick (false or unset).
    /// Returns the number of rows removed.
    pub async fn delete_heroes_without_toothpicks(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM human_beings \
             WHERE real_hero = TRUE \
               AND (has_toothpick = FALSE OR has_toothpick IS NULL)",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set every real hero's mood to SADNESS. Returns the number of rows
    /// updated.
    pub async fn set_all_mood_sadness(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE human_beings SET mood = $1 WHERE real_hero = TRUE")
            .bind(Mood::Sadness.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
