use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

use crate::getter::{get_prop, prop_bool};

/// Coerces a JSON value into a UTC timestamp.
///
/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates (midnight UTC) and
/// epoch milliseconds. Empty or unparsable values yield `None`.
pub fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) if !s.is_empty() => DateTime::parse_from_rfc3339(s)
            .map(|d| d.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|d| d.and_utc())
            }),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Reads the date at `path`, if present and parsable.
pub fn maybe_date(obj: &Value, path: &str) -> Option<DateTime<Utc>> {
    get_prop(obj, path).and_then(coerce_date)
}

/// Reads a `{"Valid": bool, "Time": "..."}` nullable timestamp.
pub fn nullable_date(obj: &Value, path: &str) -> Option<DateTime<Utc>> {
    let wrapper = get_prop(obj, path)?;
    if !prop_bool(wrapper, "Valid") {
        return None;
    }
    maybe_date(wrapper, "Time")
}

/// Serializes an optional timestamp the way the API expects (`null` when unset).
pub fn date_to_json(date: Option<&DateTime<Utc>>) -> Value {
    match date {
        Some(d) => Value::String(d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => Value::Null,
    }
}

/// Serializes an optional timestamp into the nullable `{Valid, Time}` shape.
pub fn nullable_date_to_json(date: Option<&DateTime<Utc>>) -> Value {
    serde_json::json!({
        "Valid": date.is_some(),
        "Time": date_to_json(date),
    })
}
