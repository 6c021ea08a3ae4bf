//! Tolerant `deserialize_with` helpers for numeric fields in model output.
//!
//! Models often send `1.0` for a day counter or `"150.00"` for a cost. These
//! helpers accept integers, floats and numeric strings, and fall back to the
//! field default for anything else instead of failing the whole response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Amount in USD; unusable values become `0.0`
pub(crate) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value).unwrap_or_default())
}

/// Optional number such as a rating; unusable values become `None`
pub(crate) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

/// Whole, non-negative counter; unusable values become `0`
pub(crate) fn counter<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
        .unwrap_or_default())
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}
