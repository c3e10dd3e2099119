//! Field values and the flat/nested mapping aliases shared across crates.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Insertion-ordered mapping of attribute or parameter name to value.
pub type AttrMap = serde_json::Map<String, Value>;

/// A flat mapping of field name to scalar value, ready for transmission.
pub type FlatRecord = serde_json::Map<String, Value>;

/// A value that can be rendered as a single field of a [`FlatRecord`].
///
/// Everything the tracking service accepts is expressible as JSON, so the
/// conversion is infallible. Non-finite floats become `null`.
pub trait FieldValue {
    fn to_field_value(&self) -> Value;
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl FieldValue for Value {
    fn to_field_value(&self) -> Value {
        self.clone()
    }
}

impl FieldValue for str {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FieldValue for String {
    fn to_field_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for bool {
    fn to_field_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_field_value_via_from {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                fn to_field_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_field_value_via_from!(i32, i64, u32, u64, usize, f32, f64);

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_field_value(&self) -> Value {
        match self {
            Some(v) => v.to_field_value(),
            None => Value::Null,
        }
    }
}

/// Timestamps are sent as RFC 3339 strings.
impl FieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_rfc3339())
    }
}

/// Durations are sent as fractional seconds.
impl FieldValue for Duration {
    fn to_field_value(&self) -> Value {
        duration_seconds(self).to_field_value()
    }
}

/// Fractional seconds of a chrono duration, at microsecond precision.
pub fn duration_seconds(duration: &Duration) -> f64 {
    match duration.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => duration.num_milliseconds() as f64 / 1_000.0,
    }
}
