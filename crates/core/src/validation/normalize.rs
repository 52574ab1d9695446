//! Pre-validation normalization.
//!
//! Kept strictly separate from the evaluator so the validator stays
//! side-effect-free: callers apply this exactly once per submission, then
//! validate.

use serde_json::{Map, Value};

use crate::entity::WeaponType;
use crate::validation::rules::MACHINE_GUN_MIN_IMPACT_SPEED;

/// Default `impactSpeed` to 20 when the weapon type is MACHINE_GUN and the
/// current value is absent, null, or exactly zero.
///
/// A user-entered nonzero value below 20 is left alone; the evaluator flags
/// it instead of silently correcting it.
pub fn apply_machine_gun_default(record: &mut Map<String, Value>) {
    let is_machine_gun = record
        .get("weaponType")
        .and_then(Value::as_str)
        .is_some_and(|s| s == WeaponType::MachineGun.as_str());
    if !is_machine_gun {
        return;
    }

    let unset_or_zero = match record.get("impactSpeed") {
        None | Some(Value::Null) => true,
        Some(value) => value.as_f64() == Some(0.0),
    };
    if unset_or_zero {
        record.insert(
            "impactSpeed".to_string(),
            Value::from(MACHINE_GUN_MIN_IMPACT_SPEED),
        );
    }
}

/// Rewrite integral floats (`5.0`) as plain integers on the fields the
/// typed model stores as integers: `coordinates.x`, `minutesOfWaiting`,
/// and `car.id`. The evaluator treats `5` and `5.0` alike, so this keeps
/// everything it accepts deserializable. Non-integral and out-of-range
/// floats are left in place for the evaluator to flag.
pub fn coerce_integral_floats(record: &mut Map<String, Value>) {
    if let Some(coords) = record.get_mut("coordinates").and_then(Value::as_object_mut) {
        coerce_field(coords, "x");
    }
    if let Some(car) = record.get_mut("car").and_then(Value::as_object_mut) {
        coerce_field(car, "id");
    }
    coerce_field(record, "minutesOfWaiting");
}

fn coerce_field(object: &mut Map<String, Value>, key: &str) {
    let Some(value) = object.get_mut(key) else {
        return;
    };
    if value.as_i64().is_some() || value.as_u64().is_some() {
        return;
    }
    let Some(f) = value.as_f64() else {
        return;
    };
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        *value = Value::from(f as i64);
    }
}
