//! Immutable point-in-time document views.

use serde_json::Value;

use firemock_types::{field_at, DocumentData};

use crate::converter::SnapshotOptions;
use crate::document::DocumentReference;

/// A document's state as observed at one read or notification.
///
/// The raw data is captured when the snapshot is built; later writes through
/// any reference do not affect it.
#[derive(Clone)]
pub struct DocumentSnapshot {
    reference: DocumentReference,
    data: Option<DocumentData>,
}

impl DocumentSnapshot {
    pub(crate) fn new(reference: DocumentReference, data: Option<DocumentData>) -> Self {
        Self { reference, data }
    }

    /// The reference this snapshot was read through.
    pub fn reference(&self) -> &DocumentReference {
        &self.reference
    }

    /// The document id (final path segment).
    pub fn id(&self) -> &str {
        self.reference.id()
    }

    /// Whether the document existed at read time.
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    /// The document data in its external shape, or `None` when absent.
    ///
    /// Applies the reference's converter lazily on every call; nothing is
    /// cached on the snapshot.
    pub fn data(&self) -> Option<Value> {
        self.data_with_options(&SnapshotOptions::default())
    }

    /// Like [`DocumentSnapshot::data`], with explicit snapshot options.
    pub fn data_with_options(&self, options: &SnapshotOptions) -> Option<Value> {
        self.data
            .as_ref()
            .map(|raw| self.reference.converter().from_document(raw, options))
    }

    /// The value at a dot-delimited field path, or `None` when any
    /// component is absent.
    ///
    /// Field paths address the raw stored representation: the converter is
    /// NOT applied here, so a converter that reshapes keys does not move
    /// field addresses. This matches the emulated protocol and is the
    /// documented counterpart to the converted [`DocumentSnapshot::data`].
    pub fn field(&self, dot_path: &str) -> Option<Value> {
        self.data
            .as_ref()
            .and_then(|data| field_at(data, dot_path))
            .cloned()
    }

    /// Structural equality: equal existence flags and, when both exist,
    /// recursively equal data (differing key sets are unequal).
    pub fn is_equal(&self, other: &DocumentSnapshot) -> bool {
        self.data() == other.data()
    }
}
