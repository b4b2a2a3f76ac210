//! Pluggable translation between external values and stored mappings.

use serde_json::Value;

use firemock_types::DocumentData;

/// How unresolved server timestamps would be reported by a read.
///
/// The emulation stores concrete values only, so the choice carries no
/// effect, but converters receive it for signature fidelity with the
/// emulated API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServerTimestamps {
    #[default]
    None,
    Estimate,
    Previous,
}

/// Options applied when materializing snapshot data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub server_timestamps: ServerTimestamps,
}

/// A pair of pure translations between the externally-typed value shape and
/// the store's raw nested mapping.
///
/// References carry their converter as a shared trait object; reference
/// equality (`is_equal`) compares converters by pointer, so two references
/// are only equal when they share the same converter instance.
pub trait DataConverter: Send + Sync {
    /// Translate an external value into the raw mapping that gets stored.
    fn to_document(&self, value: Value) -> DocumentData;

    /// Translate raw stored data back into the external shape.
    fn from_document(&self, data: &DocumentData, options: &SnapshotOptions) -> Value;
}

/// The default converter: stores object values as-is.
///
/// Non-object values have no mapping representation and store as an empty
/// document.
pub struct IdentityConverter;

impl DataConverter for IdentityConverter {
    fn to_document(&self, value: Value) -> DocumentData {
        match value {
            Value::Object(map) => map,
            _ => DocumentData::new(),
        }
    }

    fn from_document(&self, data: &DocumentData, _options: &SnapshotOptions) -> Value {
        Value::Object(data.clone())
    }
}
