//! Coercion rules for loosely typed JSON request fields.
//!
//! Clients send numbers either as JSON numbers or as numeric strings. These
//! helpers accept both and reject anything ambiguous by returning `None`.

use serde_json::Value;

/// A finite number from a JSON number or a numeric string.
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// An integral number that fits in `i32`.
pub fn integer(value: &Value) -> Option<i32> {
    let n = number(value)?;
    if n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
        return None;
    }
    Some(n as i32)
}

/// A strictly JSON-number count (no string coercion), non-negative and integral.
pub fn count(value: &Value) -> Option<i32> {
    match value {
        Value::Number(_) => integer(value).filter(|n| *n >= 0),
        _ => None,
    }
}

/// A scalar rendered as a string. `Err(())` for arrays and objects.
pub fn optional_string(value: Option<&Value>) -> Result<Option<String>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(()),
    }
}

/// `None` when the field is missing, null, or the empty string.
pub fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => Some(v),
    }
}

/// A positive record id.
pub fn id(value: Option<&Value>) -> Option<i32> {
    present(value).and_then(integer).filter(|n| *n > 0)
}
