//! Raw document values and the pure write algebra.
//!
//! Documents are stored as nested string-keyed mappings. The two mutation
//! strategies are deliberately asymmetric and must stay so:
//!
//! - [`shallow_merge`] overwrites only the supplied top-level keys
//!   (the `set(merge: true)` semantics);
//! - [`apply_field_patch`] addresses a single leaf by a dot-delimited field
//!   path and preserves sibling keys at every nesting level
//!   (the `update` semantics).

use serde_json::{Map, Value};

/// The raw stored representation of a document.
pub type DocumentData = Map<String, Value>;

/// Merge `patch` over `base` at the top level only.
///
/// Every top-level key of `patch` replaces the corresponding key of `base`
/// outright, nested values included. Keys absent from `patch` are untouched.
pub fn shallow_merge(base: &mut DocumentData, patch: DocumentData) {
    for (key, value) in patch {
        base.insert(key, value);
    }
}

/// Overwrite the leaf addressed by a dot-delimited field path.
///
/// Descends `data` component by component, replacing any missing or
/// non-mapping intermediate with a fresh empty mapping, and writes `value`
/// at the final component. Sibling keys along the way are preserved.
pub fn apply_field_patch(data: &mut DocumentData, dot_key: &str, value: Value) {
    let parts: Vec<&str> = dot_key.split('.').collect();
    let mut current = data;

    for part in &parts[..parts.len() - 1] {
        if !current.get(*part).is_some_and(Value::is_object) {
            current.insert((*part).to_string(), Value::Object(Map::new()));
        }
        current = current
            .get_mut(*part)
            .and_then(Value::as_object_mut)
            .expect("intermediate component was just made a mapping");
    }

    // split() yields at least one component, even for an empty key.
    current.insert(parts[parts.len() - 1].to_string(), value);
}

/// Look up the value at a dot-delimited field path.
///
/// Returns `None` when any intermediate component is absent or not a
/// mapping.
pub fn field_at<'a>(data: &'a DocumentData, dot_path: &str) -> Option<&'a Value> {
    let mut parts = dot_path.split('.');
    let mut current = data.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}
