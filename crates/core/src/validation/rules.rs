//! Violation types and field bounds for Human Being validation.

use std::collections::BTreeMap;

/// Mapping from dotted field path (`coordinates.x`, `car.name`, ...) to a
/// single human-readable violation message. An empty map means the candidate
/// is valid; absence of an entry for a field means that field is valid.
pub type Violations = BTreeMap<String, String>;

pub const NAME_MAX_LEN: usize = 100;
pub const SOUNDTRACK_NAME_MAX_LEN: usize = 100;
pub const CAR_NAME_MAX_LEN: usize = 50;

pub const COORD_X_MIN: i64 = -1000;
pub const COORD_X_MAX: i64 = 1000;

/// Exclusive lower bound: y must be strictly greater than -965.
pub const COORD_Y_MIN_EXCLUSIVE: f64 = -965.0;
pub const COORD_Y_MAX: f64 = 1000.0;

pub const IMPACT_SPEED_MIN: f64 = -1000.0;
pub const IMPACT_SPEED_MAX: f64 = 1000.0;

/// Minimum impact speed when the weapon type is MACHINE_GUN.
pub const MACHINE_GUN_MIN_IMPACT_SPEED: f64 = 20.0;

pub const MINUTES_OF_WAITING_MAX: i64 = 99_999;
