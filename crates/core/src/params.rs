//! Helpers for reading typed parameters out of a partial JSON object.
//!
//! Each helper takes a JSON value, a key and a default. A missing key or a
//! value of the wrong type yields the default; these never fail. Validation
//! of the resulting values is [`SpectrumConfig::validate`](crate::SpectrumConfig::validate)'s job.

use glam::Vec2;
use serde_json::Value;

/// Extracts an `f32` from `params[name]`; integers are accepted.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a non-negative integer as `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a 2D vector given either as `[x, y]` or `{"x": .., "y": ..}`.
pub fn param_vec2(params: &Value, name: &str, default: Vec2) -> Vec2 {
    let Some(value) = params.get(name) else {
        return default;
    };
    let pair = match value {
        Value::Array(items) if items.len() == 2 => items[0].as_f64().zip(items[1].as_f64()),
        Value::Object(_) => value
            .get("x")
            .and_then(Value::as_f64)
            .zip(value.get("y").and_then(Value::as_f64)),
        _ => None,
    };
    pair.map(|(x, y)| Vec2::new(x as f32, y as f32))
        .unwrap_or(default)
}
