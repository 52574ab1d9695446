//! Human Being entity model and DTOs.

use hbm_core::entity::{Mood, WeaponType};
use hbm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::car::Car;

/// A `human_beings` row joined with its `cars` row.
///
/// Column aliases `car_id` / `car_name` / `car_cool` come from the shared
/// SELECT list in the repository.
#[derive(Debug, Clone, FromRow)]
pub struct HumanBeingRow {
    pub id: DbId,
    pub name: String,
    pub x: i32,
    pub y: f64,
    pub creation_date: Timestamp,
    pub real_hero: bool,
    pub has_toothpick: Option<bool>,
    pub mood: String,
    pub impact_speed: f64,
    pub soundtrack_name: String,
    pub minutes_of_waiting: i64,
    pub weapon_type: String,
    pub car_id: DbId,
    pub car_name: Option<String>,
    pub car_cool: bool,
}

/// Nested coordinates object as it appears on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: f64,
}

/// API-shape Human Being: camelCase fields, nested `coordinates` and `car`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanBeing {
    pub id: DbId,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: Timestamp,
    pub real_hero: bool,
    pub has_toothpick: Option<bool>,
    pub car: Car,
    pub mood: String,
    pub impact_speed: f64,
    pub soundtrack_name: String,
    pub minutes_of_waiting: i64,
    pub weapon_type: String,
}

impl From<HumanBeingRow> for HumanBeing {
    fn from(row: HumanBeingRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            coordinates: Coordinates { x: row.x, y: row.y },
            creation_date: row.creation_date,
            real_hero: row.real_hero,
            has_toothpick: row.has_toothpick,
            car: Car {
                id: row.car_id,
                name: row.car_name,
                cool: row.car_cool,
            },
            mood: row.mood,
            impact_speed: row.impact_speed,
            soundtrack_name: row.soundtrack_name,
            minutes_of_waiting: row.minutes_of_waiting,
            weapon_type: row.weapon_type,
        }
    }
}

/// Car reference in a create/update payload: either an existing `id` or
/// inline fields for a new row.
#[derive(Debug, Clone, Deserialize)]
pub struct CarInput {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cool: Option<bool>,
}

/// Typed input DTO for create and full-replace update.
///
/// Deserialized from the raw JSON record only after the validation engine
/// has accepted it, so field-level constraints already hold here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHumanBeing {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub real_hero: bool,
    #[serde(default)]
    pub has_toothpick: Option<bool>,
    pub car: CarInput,
    pub mood: Mood,
    pub impact_speed: f64,
    pub soundtrack_name: String,
    pub minutes_of_waiting: i64,
    pub weapon_type: WeaponType,
}
