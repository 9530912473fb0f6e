//! Safe nested-field lookup over JSON-shaped values

use serde_json::Value;

/// Walk `path` through nested objects and return the value at the end.
///
/// Returns `None` if any segment is missing, any intermediate value is not
/// an object, or the final value is JSON `null`. Never panics.
pub fn lookup_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Return the first non-null value found among `paths`, tried in order.
pub fn first_of<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup_path(value, path))
}
