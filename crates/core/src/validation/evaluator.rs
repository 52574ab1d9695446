//! Rule evaluator: pure logic, no database access.
//!
//! The evaluator takes a loosely-typed JSON record (all fields possibly
//! missing, null, or of the wrong type) and returns the full set of
//! field-level violations. It never fails: a value the engine cannot
//! interpret is reported as a violation on that field. Every field is
//! checked on every call; nothing short-circuits across fields, so the
//! result is independent of evaluation order and the function is idempotent.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::entity::{Mood, WeaponType};

use super::rules::{
    Violations, CAR_NAME_MAX_LEN, COORD_X_MAX, COORD_X_MIN, COORD_Y_MAX, COORD_Y_MIN_EXCLUSIVE,
    IMPACT_SPEED_MAX, IMPACT_SPEED_MIN, MACHINE_GUN_MIN_IMPACT_SPEED, MINUTES_OF_WAITING_MAX,
    NAME_MAX_LEN, SOUNDTRACK_NAME_MAX_LEN,
};

/// Letters, digits, whitespace, hyphens, underscores, and periods.
static ALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s\-_.]+$").expect("charset pattern is valid"));

/// Evaluate all field and cross-field rules against a candidate record.
///
/// Callers that want the MACHINE_GUN impact-speed default must apply
/// [`super::normalize::apply_machine_gun_default`] exactly once before
/// calling this; the evaluator itself never mutates its input.
pub fn validate(record: &Map<String, Value>) -> Violations {
    let mut violations = Violations::new();

    check_name(record.get("name"), &mut violations);
    check_coordinate_x(nested(record, "coordinates", "x"), &mut violations);
    check_coordinate_y(nested(record, "coordinates", "y"), &mut violations);
    check_car(record.get("car"), &mut violations);
    check_mood(record.get("mood"), &mut violations);
    check_impact_speed(record, &mut violations);
    check_soundtrack_name(record.get("soundtrackName"), &mut violations);
    check_minutes_of_waiting(record.get("minutesOfWaiting"), &mut violations);
    check_weapon_type(record.get("weaponType"), &mut violations);
    // realHero defaults to false when absent and hasToothpick is an
    // unconstrained tri-state; neither ever produces a violation.

    violations
}

fn nested<'a>(record: &'a Map<String, Value>, outer: &str, inner: &str) -> Option<&'a Value> {
    record.get(outer)?.as_object()?.get(inner)
}

fn violate(violations: &mut Violations, field: &str, message: impl Into<String>) {
    violations.insert(field.to_string(), message.into());
}

fn check_name(value: Option<&Value>, violations: &mut Violations) {
    match value {
        None | Some(Value::Null) => violate(violations, "name", "Name is required"),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                violate(violations, "name", "Name is required");
            } else if s.chars().count() > NAME_MAX_LEN {
                violate(violations, "name", "Name must be 100 characters or less");
            } else if !ALLOWED_CHARS.is_match(s) {
                violate(
                    violations,
                    "name",
                    "Name can only contain letters, numbers, spaces, hyphens, underscores, and periods",
                );
            }
        }
        Some(_) => violate(violations, "name", "Name must be a string"),
    }
}

fn check_coordinate_x(value: Option<&Value>, violations: &mut Violations) {
    const FIELD: &str = "coordinates.x";
    let Some(value) = value.filter(|v| !v.is_null()) else {
        violate(violations, FIELD, "X coordinate is required");
        return;
    };
    let Some(x) = as_integer(value) else {
        if value.is_number() {
            violate(violations, FIELD, "X must be an integer");
        } else {
            violate(violations, FIELD, "X coordinate must be a number");
        }
        return;
    };
    if !(COORD_X_MIN..=COORD_X_MAX).contains(&x) {
        violate(violations, FIELD, "X coordinate must be between -1000 and 1000");
    } else if x == 0 {
        violate(violations, FIELD, "X coordinate cannot be zero");
    }
}

fn check_coordinate_y(value: Option<&Value>, violations: &mut Violations) {
    const FIELD: &str = "coordinates.y";
    let Some(value) = value.filter(|v| !v.is_null()) else {
        violate(violations, FIELD, "Y coordinate is required");
        return;
    };
    let Some(y) = value.as_f64() else {
        violate(violations, FIELD, "Y coordinate must be a number");
        return;
    };
    if y <= COORD_Y_MIN_EXCLUSIVE {
        violate(violations, FIELD, "Y coordinate must be greater than -965");
    } else if y > COORD_Y_MAX {
        violate(violations, FIELD, "Y coordinate must be at most 1000");
    } else if y == 0.0 {
        violate(violations, FIELD, "Y coordinate cannot be zero");
    }
}

/// A car is either specified inline (`cool` required, `name` optional) or
/// selected by reference (`id` present); referenced cars are resolved and
/// checked by the store, not here.
fn check_car(value: Option<&Value>, violations: &mut Violations) {
    let Some(car) = value.and_then(Value::as_object) else {
        violate(violations, "car.cool", "Car cool status is required");
        return;
    };
    if car.get("id").is_some_and(|id| !id.is_null()) {
        return;
    }

    match car.get("cool") {
        Some(Value::Bool(_)) => {}
        _ => violate(violations, "car.cool", "Car cool status is required"),
    }

    match car.get("name") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => {
            if s.chars().count() > CAR_NAME_MAX_LEN {
                violate(violations, "car.name", "Car name must be 50 characters or less");
            } else if !s.is_empty() && !ALLOWED_CHARS.is_match(s) {
                violate(
                    violations,
                    "car.name",
                    "Car name can only contain letters, numbers, spaces, hyphens, underscores, and periods",
                );
            }
        }
        Some(_) => violate(violations, "car.name", "Car name must be a string"),
    }
}

fn check_mood(value: Option<&Value>, violations: &mut Violations) {
    match value {
        None | Some(Value::Null) => violate(violations, "mood", "Mood is required"),
        Some(value) => {
            let recognized = value
                .as_str()
                .is_some_and(|s| Mood::from_str(s).is_ok());
            if !recognized {
                violate(violations, "mood", "Please select a valid mood");
            }
        }
    }
}

fn check_weapon_type(value: Option<&Value>, violations: &mut Violations) {
    match value {
        None | Some(Value::Null) => {
            violate(violations, "weaponType", "Weapon type is required");
        }
        Some(value) => {
            let recognized = value
                .as_str()
                .is_some_and(|s| WeaponType::from_str(s).is_ok());
            if !recognized {
                violate(violations, "weaponType", "Please select a valid weapon type");
            }
        }
    }
}

/// Cross-field rule: the impact speed bound depends on `weaponType` and
/// `realHero`, so this check reads the whole record. The most specific
/// applicable message wins (MACHINE_GUN floor, then the real-hero floor,
/// then the general range).
fn check_impact_speed(record: &Map<String, Value>, violations: &mut Violations) {
    const FIELD: &str = "impactSpeed";
    let Some(value) = record.get(FIELD).filter(|v| !v.is_null()) else {
        violate(violations, FIELD, "Impact speed is required");
        return;
    };
    let Some(speed) = value.as_f64() else {
        violate(violations, FIELD, "Impact speed must be a number");
        return;
    };

    let weapon = record
        .get("weaponType")
        .and_then(Value::as_str)
        .and_then(|s| WeaponType::from_str(s).ok());
    let real_hero = record
        .get("realHero")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if weapon == Some(WeaponType::MachineGun) && speed < MACHINE_GUN_MIN_IMPACT_SPEED {
        violate(violations, FIELD, "MACHINE_GUN requires impact speed of at least 20");
    } else if real_hero && speed < 0.0 {
        violate(violations, FIELD, "Real heroes cannot have negative impact speed");
    } else if !(IMPACT_SPEED_MIN..=IMPACT_SPEED_MAX).contains(&speed) {
        violate(violations, FIELD, "Impact speed must be between -1000 and 1000");
    }
}

fn check_soundtrack_name(value: Option<&Value>, violations: &mut Violations) {
    const FIELD: &str = "soundtrackName";
    match value {
        None | Some(Value::Null) => violate(violations, FIELD, "Soundtrack name is required"),
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                violate(violations, FIELD, "Soundtrack name is required");
            } else if s.chars().count() > SOUNDTRACK_NAME_MAX_LEN {
                violate(violations, FIELD, "Soundtrack name must be 100 characters or less");
            } else if !ALLOWED_CHARS.is_match(s) {
                violate(
                    violations,
                    FIELD,
                    "Soundtrack name can only contain letters, numbers, spaces, hyphens, underscores, and periods",
                );
            }
        }
        Some(_) => violate(violations, FIELD, "Soundtrack name must be a string"),
    }
}

fn check_minutes_of_waiting(value: Option<&Value>, violations: &mut Violations) {
    const FIELD: &str = "minutesOfWaiting";
    let Some(value) = value.filter(|v| !v.is_null()) else {
        violate(violations, FIELD, "Minutes of waiting is required");
        return;
    };
    let Some(minutes) = as_integer(value) else {
        violate(violations, FIELD, "Minutes of waiting must be a whole number");
        return;
    };
    if minutes < 0 {
        violate(violations, FIELD, "Minutes of waiting cannot be negative");
    } else if minutes > MINUTES_OF_WAITING_MAX {
        violate(violations, FIELD, "Minutes of waiting must be less than 100,000");
    }
}

/// Interpret a JSON value as an integer. Accepts `5` and `5.0` but not
/// `5.5` or non-numbers.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}
