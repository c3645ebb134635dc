//! Field lookup on dynamic JSON rows.

use serde_json::Value;

use crate::domain::types::RowId;

/// Walks `path` (`"employeeId.name"`) through nested objects.
///
/// Numeric segments index into arrays. Returns `None` on any missing link
/// and when the addressed value is `null`.
pub fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = row;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Reads the row identifier stored under `id_field`. Numeric ids are
/// rendered as strings; other kinds yield `None`.
pub fn row_id(row: &Value, id_field: &str) -> Option<RowId> {
    match resolve_path(row, id_field)? {
        Value::String(s) if !s.is_empty() => Some(RowId::from(s.as_str())),
        Value::Number(n) => Some(RowId::from(n.to_string())),
        _ => None,
    }
}

/// Textual form of a scalar cell, used for equality filters.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
