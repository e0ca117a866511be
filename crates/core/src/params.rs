//! Forgiving typed lookups into a JSON params object.
//!
//! A missing key or a value of the wrong JSON type yields the default; these
//! never fail. Range and sanity checks happen later, in
//! [`SimulationConfig::validate`](crate::config::SimulationConfig::validate).

use serde_json::Value;

/// `params[name]` as `f64`; integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as a signed integer. Floats are rejected, not truncated.
pub fn param_i64(params: &Value, name: &str, default: i64) -> i64 {
    params.get(name).and_then(Value::as_i64).unwrap_or(default)
}
