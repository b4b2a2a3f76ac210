//! The store handle: path resolution and top-level operations.

use std::sync::Arc;

use tracing::debug;

use firemock_events::EmitterRegistry;
use firemock_store::DocumentStore;
use firemock_types::{CanonicalPath, PathKind};

use crate::collection::{CollectionReference, QuerySnapshot};
use crate::converter::{DataConverter, IdentityConverter};
use crate::document::DocumentReference;
use crate::error::{FirestoreError, FirestoreResult};
use crate::snapshot::DocumentSnapshot;

pub(crate) struct Inner {
    pub(crate) store: DocumentStore,
    pub(crate) doc_events: EmitterRegistry<DocumentSnapshot, FirestoreError>,
    pub(crate) coll_events: EmitterRegistry<QuerySnapshot, FirestoreError>,
    // One shared default converter per store, so two default references to
    // the same path compare equal under `is_equal`.
    pub(crate) default_converter: Arc<dyn DataConverter>,
}

/// Handle to one in-memory store instance.
///
/// Cloning is cheap and shares all state; "same store instance" in the
/// reference-equality rules means clones of the same handle. All data is
/// discarded when the last handle drops.
#[derive(Clone)]
pub struct Firestore {
    pub(crate) inner: Arc<Inner>,
}

impl Firestore {
    /// Create an empty store instance.
    pub fn new() -> Self {
        debug!("firestore instance created");
        Self {
            inner: Arc::new(Inner {
                store: DocumentStore::new(),
                doc_events: EmitterRegistry::new(),
                coll_events: EmitterRegistry::new(),
                default_converter: Arc::new(IdentityConverter),
            }),
        }
    }

    /// Resolve a collection path (odd segment count).
    pub fn collection(&self, path: &str) -> FirestoreResult<CollectionReference> {
        let path = CanonicalPath::parse(path, PathKind::Collection)?;
        Ok(CollectionReference::new(
            self.clone(),
            path,
            Arc::clone(&self.inner.default_converter),
        ))
    }

    /// Resolve a document path (even segment count).
    pub fn doc(&self, path: &str) -> FirestoreResult<DocumentReference> {
        let path = CanonicalPath::parse(path, PathKind::Document)?;
        Ok(DocumentReference::new(
            self.clone(),
            path,
            Arc::clone(&self.inner.default_converter),
        ))
    }

    /// Batched writes are not part of the emulation.
    pub fn batch(&self) -> FirestoreResult<WriteBatch> {
        Err(FirestoreError::NotImplemented {
            operation: "Firestore::batch".into(),
        })
    }

    /// Transactions are not part of the emulation.
    pub fn run_transaction(&self) -> FirestoreResult<Transaction> {
        Err(FirestoreError::NotImplemented {
            operation: "Firestore::run_transaction".into(),
        })
    }

    /// Accepted no-op: there is nothing to persist to.
    pub async fn enable_persistence(&self) -> FirestoreResult<()> {
        Ok(())
    }

    /// Whether two handles share the same underlying store instance.
    pub fn same_instance(&self, other: &Firestore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of documents currently present in the store.
    pub fn document_count(&self) -> usize {
        self.inner.store.len()
    }
}

impl Default for Firestore {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholder for the unimplemented batched-write surface; cannot be
/// constructed.
pub struct WriteBatch {
    _private: (),
}

/// Placeholder for the unimplemented transaction surface; cannot be
/// constructed.
pub struct Transaction {
    _private: (),
}
