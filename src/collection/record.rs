//! Lenient field access on loosely typed records.

use serde_json::Value;

use super::Record;

/// Read a record's id: a JSON integer, an integral float, or a numeric string.
pub fn record_id(record: &Record) -> Option<i64> {
    record.get("id").and_then(as_integer)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if n.is_i64() => n.as_i64(),
        other => as_number(other)
            .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
            .map(|n| n as i64),
    }
}

/// Typed getters that never fail; absent or malformed fields read as zero or
/// the empty string.
pub trait RecordExt {
    /// Numeric field, `0.0` when missing or not a number.
    fn number(&self, key: &str) -> f64;

    /// Numeric field, `None` when missing or not a number.
    fn optional_number(&self, key: &str) -> Option<f64>;

    /// Integral field such as a foreign key.
    fn integer(&self, key: &str) -> Option<i64>;

    /// String field, `""` when missing or not a string.
    fn text(&self, key: &str) -> &str;
}

impl RecordExt for Record {
    fn number(&self, key: &str) -> f64 {
        self.optional_number(key).unwrap_or(0.0)
    }

    fn optional_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(as_number)
    }

    fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(as_integer)
    }

    fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }
}
