use crate::models::{FieldValue, Timestamp};

/// One fallible coercion attempt.
type Coercion = fn(&str) -> Option<FieldValue>;

/// Tried in order; the first success wins, text is the fallback.
const CASCADE: &[Coercion] = &[as_integer, as_timestamp];

/// Coerces a cleaned value: integer, then ISO-8601 timestamp, then text.
pub fn coerce(value: &str) -> FieldValue {
    CASCADE
        .iter()
        .find_map(|attempt| attempt(value))
        .unwrap_or_else(|| FieldValue::Text(value.to_string()))
}

fn as_integer(value: &str) -> Option<FieldValue> {
    value.parse::<i64>().ok().map(FieldValue::Integer)
}

fn as_timestamp(value: &str) -> Option<FieldValue> {
    Timestamp::parse_iso8601(value).map(FieldValue::Timestamp)
}
