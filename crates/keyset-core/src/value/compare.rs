use crate::{db::predicate::CoercionId, value::Value};
use std::cmp::Ordering;

/// Case-fold `text` for ordinal case-insensitive keys.
#[must_use]
pub fn casefold(text: &str) -> String {
    text.chars().flat_map(char::to_uppercase).collect()
}

/// Case-insensitive ordinal comparison (each scalar upper-cased first).
#[must_use]
pub fn casefold_cmp(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_uppercase)
        .cmp(right.chars().flat_map(char::to_uppercase))
}

#[must_use]
pub fn casefold_eq(left: &str, right: &str) -> bool {
    casefold_cmp(left, right).is_eq()
}

/// Strict comparator for identical orderable variants.
///
/// Floats use IEEE total order so the result is total even with NaN.
/// Returns `None` for mismatched variants.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Float32(a), Value::Float32(b)) => Some(a.total_cmp(b)),
        (Value::Float64(a), Value::Float64(b)) => Some(a.total_cmp(b)),
        (Value::Int8(a), Value::Int8(b)) => Some(a.cmp(b)),
        (Value::Int16(a), Value::Int16(b)) => Some(a.cmp(b)),
        (Value::Int32(a), Value::Int32(b)) => Some(a.cmp(b)),
        (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Uint8(a), Value::Uint8(b)) => Some(a.cmp(b)),
        (Value::Uint16(a), Value::Uint16(b)) => Some(a.cmp(b)),
        (Value::Uint32(a), Value::Uint32(b)) => Some(a.cmp(b)),
        (Value::Uint64(a), Value::Uint64(b)) => Some(a.cmp(b)),
        (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Ordering under an explicit coercion policy.
#[must_use]
pub fn compare_order(left: &Value, right: &Value, coercion: CoercionId) -> Option<Ordering> {
    match (coercion, left, right) {
        (CoercionId::TextCasefold, Value::Text(a), Value::Text(b)) => Some(casefold_cmp(a, b)),
        // false < true, the ordinal of `bool::cmp`
        (CoercionId::BoolOrdinal, Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => strict_order_cmp(left, right),
    }
}

/// Equality under the same policy, so ordering and equality never disagree.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value, coercion: CoercionId) -> Option<bool> {
    compare_order(left, right, coercion).map(Ordering::is_eq)
}
