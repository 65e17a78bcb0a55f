//! Dotted-path access into loosely structured API payloads.
//!
//! The content API gives no schema guarantees, so every view-model field is
//! pulled through these helpers and silently falls back when absent.

use serde_json::Value;

/// Walks `path` (segments separated by `.`) through nested objects and arrays.
///
/// Numeric segments index into arrays. Returns `None` as soon as a segment is
/// missing; a JSON `null` at the end of the path also counts as missing. An
/// empty path returns `obj` itself.
pub fn get_prop<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = obj;
    if !path.is_empty() {
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Like [`get_prop`] but returns `fallback` when the path is absent.
pub fn get_prop_or<'a>(obj: &'a Value, path: &str, fallback: &'a Value) -> &'a Value {
    get_prop(obj, path).unwrap_or(fallback)
}

/// Reads a scalar as a string. Numbers and booleans are stringified.
pub fn prop_string(obj: &Value, path: &str) -> Option<String> {
    match get_prop(obj, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads a scalar as a string, empty when absent.
pub fn prop_str(obj: &Value, path: &str) -> String {
    prop_string(obj, path).unwrap_or_default()
}

/// Reads an integer. Floats are truncated and numeric strings are parsed.
pub fn prop_i64(obj: &Value, path: &str) -> Option<i64> {
    match get_prop(obj, path)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a floating point number.
pub fn prop_f64(obj: &Value, path: &str) -> Option<f64> {
    match get_prop(obj, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a flag using the API's loose truthiness rules.
pub fn prop_bool(obj: &Value, path: &str) -> bool {
    get_prop(obj, path).is_some_and(is_truthy)
}

/// Returns the array at `path`, or an empty slice.
pub fn prop_array<'a>(obj: &'a Value, path: &str) -> &'a [Value] {
    match get_prop(obj, path) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

/// Returns the string items of the array at `path`, skipping anything else.
pub fn prop_strings(obj: &Value, path: &str) -> Vec<String> {
    prop_array(obj, path)
        .iter()
        .filter_map(|item| item.as_str().map(ToOwned::to_owned))
        .collect()
}

/// Loose truthiness: `false`, `0`, `""`, `null` are false, everything else true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
