//! Document references: the write semantics and the notification engine.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use firemock_events::{Observer, ObserverArgs, Subscription};
use firemock_types::{apply_field_patch, shallow_merge, CanonicalPath, PathKind};

use crate::collection::CollectionReference;
use crate::converter::DataConverter;
use crate::error::{FirestoreError, FirestoreResult};
use crate::firestore::Firestore;
use crate::snapshot::DocumentSnapshot;

/// Registration call shapes for document listeners.
pub type DocumentObserverArgs = ObserverArgs<DocumentSnapshot, FirestoreError>;

/// Handle to one registered document listener.
pub type DocumentSubscription = Subscription<DocumentSnapshot, FirestoreError>;

/// Options for [`DocumentReference::set`].
#[derive(Clone, Debug, Default)]
pub struct SetOptions {
    /// Shallow-merge the supplied top-level keys over the current data
    /// instead of replacing it outright.
    pub merge: bool,
    /// Field-mask merging; accepted for surface fidelity but not
    /// implemented. Any non-empty value fails `UnsupportedOption`.
    pub merge_fields: Vec<String>,
}

impl SetOptions {
    /// Options with `merge: true`.
    pub fn merge() -> Self {
        Self {
            merge: true,
            ..Self::default()
        }
    }
}

/// Argument forms accepted by [`DocumentReference::update`].
///
/// The emulated API also admits a single field-path-plus-value call; that
/// form is carried here so it can be rejected with `UnsupportedOption`
/// before any mutation, exactly as the emulation requires.
pub enum UpdateArgs {
    /// Mapping of dot-delimited field paths to replacement values.
    Fields(Map<String, Value>),
    /// Single field-path-plus-value form; always rejected.
    FieldValue { field: String, value: Value },
}

impl From<Map<String, Value>> for UpdateArgs {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Fields(fields)
    }
}

impl From<(&str, Value)> for UpdateArgs {
    fn from((field, value): (&str, Value)) -> Self {
        Self::FieldValue {
            field: field.to_string(),
            value,
        }
    }
}

/// Handle identifying a document path on one store instance.
///
/// References are pure values: creating one performs no I/O and allocates no
/// store state. Two references to the same path on the same store observe
/// the same stored value.
#[derive(Clone)]
pub struct DocumentReference {
    firestore: Firestore,
    path: CanonicalPath,
    converter: Arc<dyn DataConverter>,
}

impl DocumentReference {
    pub(crate) fn new(
        firestore: Firestore,
        path: CanonicalPath,
        converter: Arc<dyn DataConverter>,
    ) -> Self {
        Self {
            firestore,
            path,
            converter,
        }
    }

    /// The document id (final path segment).
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// The canonical path, rendered with a leading slash.
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    /// The store this reference belongs to.
    pub fn firestore(&self) -> &Firestore {
        &self.firestore
    }

    pub(crate) fn converter(&self) -> &Arc<dyn DataConverter> {
        &self.converter
    }

    /// The parent collection. Every document path has one.
    pub fn parent(&self) -> CollectionReference {
        let parent = self
            .path
            .parent()
            .expect("document paths always have a parent collection");
        CollectionReference::new(self.firestore.clone(), parent, Arc::clone(&self.converter))
    }

    /// Resolve a child collection at `{self}/{relative}`.
    pub fn collection(&self, relative: &str) -> FirestoreResult<CollectionReference> {
        self.firestore
            .collection(&format!("{}/{relative}", self.path))
    }

    /// A new handle at the same path with a different converter. The
    /// receiver is unchanged.
    pub fn with_converter(&self, converter: Arc<dyn DataConverter>) -> DocumentReference {
        DocumentReference::new(self.firestore.clone(), self.path.clone(), converter)
    }

    /// Behavioral equality: same store instance, same canonical path, same
    /// converter instance.
    pub fn is_equal(&self, other: &DocumentReference) -> bool {
        self.firestore.same_instance(&other.firestore)
            && self.path == other.path
            && Arc::ptr_eq(&self.converter, &other.converter)
    }

    /// Write the document.
    ///
    /// With `merge: false` the converted value replaces the stored data
    /// outright; with `merge: true` its top-level keys are shallow-merged
    /// over the current data (absent counts as empty). Listeners observe the
    /// change before the returned future resolves.
    pub async fn set(&self, value: Value, options: SetOptions) -> FirestoreResult<()> {
        if !options.merge_fields.is_empty() {
            return Err(FirestoreError::UnsupportedOption {
                option: "mergeFields".into(),
            });
        }

        let parsed = self.converter.to_document(value);
        let store = &self.firestore.inner.store;
        let before = store.get(&self.path);

        let next = if options.merge {
            let mut merged = before.clone().unwrap_or_default();
            shallow_merge(&mut merged, parsed);
            merged
        } else {
            parsed
        };

        let changed = before.as_ref() != Some(&next);
        store.set(self.path.clone(), next);
        if changed {
            self.notify_change();
        }
        Ok(())
    }

    /// Patch individual fields addressed by dot-delimited paths.
    ///
    /// Fails `NotFound` when the document is absent. Unlike `set` with
    /// merge, this is a deep patch: only the addressed leaves change and
    /// sibling keys at every nesting level are preserved.
    pub async fn update(&self, args: impl Into<UpdateArgs>) -> FirestoreResult<()> {
        let fields = match args.into() {
            UpdateArgs::FieldValue { field, .. } => {
                return Err(FirestoreError::UnsupportedOption {
                    option: format!("updating by field path ({field:?})"),
                });
            }
            UpdateArgs::Fields(fields) => fields,
        };

        let store = &self.firestore.inner.store;
        let Some(before) = store.get(&self.path) else {
            return Err(FirestoreError::NotFound {
                path: self.path.to_string(),
            });
        };

        let mut next = before.clone();
        for (dot_key, value) in fields {
            apply_field_patch(&mut next, &dot_key, value);
        }

        if next != before {
            store.set(self.path.clone(), next);
            self.notify_change();
        }
        Ok(())
    }

    /// Mark the document absent. Notifies only when it was present.
    pub async fn delete(&self) -> FirestoreResult<()> {
        if self.firestore.inner.store.remove(&self.path) {
            self.notify_change();
        }
        Ok(())
    }

    /// Read the current state. Always succeeds; a missing document is an
    /// existing snapshot with `exists() == false`, never an error.
    pub async fn get(&self) -> FirestoreResult<DocumentSnapshot> {
        Ok(self.current_snapshot())
    }

    /// Register a listener.
    ///
    /// The call shape is normalized first, the current snapshot is delivered
    /// to `next` immediately, and only then is the record subscribed to the
    /// path's emitter — so the listener never sees the registration-time
    /// state twice.
    pub fn on_snapshot(&self, args: DocumentObserverArgs) -> DocumentSubscription {
        let observer = Observer::normalize(args);
        (observer.next)(&self.current_snapshot());

        let emitter = self
            .firestore
            .inner
            .doc_events
            .emitter_for(&self.path.to_string());
        let id = emitter.subscribe(observer);
        Subscription::new(emitter, id)
    }

    pub(crate) fn current_snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot::new(self.clone(), self.firestore.inner.store.get(&self.path))
    }

    // Push a fresh snapshot to this path's emitter, then bubble to every
    // ancestor collection's emitter, nearest first.
    fn notify_change(&self) {
        let snapshot = self.current_snapshot();
        debug!(path = %self.path, exists = snapshot.exists(), "document changed");
        self.firestore
            .inner
            .doc_events
            .emitter_for(&self.path.to_string())
            .emit(&snapshot);

        for ancestor in self.path.ancestors() {
            if ancestor.kind() != PathKind::Collection {
                continue;
            }
            let collection = CollectionReference::new(
                self.firestore.clone(),
                ancestor,
                Arc::clone(&self.firestore.inner.default_converter),
            );
            let snapshot = collection.current_snapshot();
            self.firestore
                .inner
                .coll_events
                .emitter_for(&collection.path())
                .emit(&snapshot);
        }
    }
}
