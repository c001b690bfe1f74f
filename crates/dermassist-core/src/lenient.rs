//! Loose field extraction for records coming out of the classification and
//! identity stores.
//!
//! Those stores are schemaless JSON, so a field may be missing, `null`, or of
//! the wrong scalar type. Every helper here degrades to `None` instead of
//! failing; callers pick the placeholder.

use serde_json::{Map, Value};

/// A non-empty string. Numbers and booleans are stringified, empty strings,
/// arrays and objects count as absent.
pub fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A finite number. Numeric strings are accepted the way the stores write
/// them (`"0.93"`).
pub fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(number)
}

/// Interpret a single value as a finite number.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A non-negative integer identifier, from a number or a digit string.
pub fn id_field(obj: &Map<String, Value>, key: &str) -> Option<u64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
