//! Collection references and the query snapshots their listeners receive.

use std::sync::Arc;

use serde_json::Value;

use firemock_events::{Observer, ObserverArgs, Subscription};
use firemock_types::CanonicalPath;

use crate::converter::DataConverter;
use crate::document::{DocumentReference, SetOptions};
use crate::error::{FirestoreError, FirestoreResult};
use crate::firestore::Firestore;
use crate::query::Query;
use crate::snapshot::DocumentSnapshot;

/// Registration call shapes for collection listeners.
pub type QueryObserverArgs = ObserverArgs<QuerySnapshot, FirestoreError>;

/// Handle to one registered collection listener.
pub type QuerySubscription = Subscription<QuerySnapshot, FirestoreError>;

/// Point-in-time view of a collection's direct children.
///
/// Holds one [`DocumentSnapshot`] per direct child document present at
/// materialization time, ordered by id. Descendants nested below further
/// subcollections are not members.
#[derive(Clone)]
pub struct QuerySnapshot {
    reference: CollectionReference,
    docs: Vec<DocumentSnapshot>,
}

impl QuerySnapshot {
    pub(crate) fn new(reference: CollectionReference, docs: Vec<DocumentSnapshot>) -> Self {
        Self { reference, docs }
    }

    /// The collection this snapshot was taken from.
    pub fn reference(&self) -> &CollectionReference {
        &self.reference
    }

    /// The member document snapshots, ordered by id.
    pub fn docs(&self) -> &[DocumentSnapshot] {
        &self.docs
    }

    /// Number of member documents.
    pub fn size(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Handle identifying a collection path on one store instance.
///
/// Like document references, collection references are pure values;
/// collections themselves are implied by the documents under them and are
/// never created or deleted.
#[derive(Clone)]
pub struct CollectionReference {
    firestore: Firestore,
    path: CanonicalPath,
    converter: Arc<dyn DataConverter>,
}

impl CollectionReference {
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

    /// The collection id (final path segment).
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

    /// The parent document, or `None` for root collections.
    pub fn parent(&self) -> Option<DocumentReference> {
        self.path.parent().map(|parent| {
            DocumentReference::new(self.firestore.clone(), parent, Arc::clone(&self.converter))
        })
    }

    /// Resolve a member document by id, inheriting this reference's
    /// converter.
    pub fn doc(&self, id: &str) -> FirestoreResult<DocumentReference> {
        let path = format!("{}/{id}", self.path);
        let path = CanonicalPath::parse(&path, firemock_types::PathKind::Document)?;
        Ok(DocumentReference::new(
            self.firestore.clone(),
            path,
            Arc::clone(&self.converter),
        ))
    }

    /// Resolve a member document under a fresh generated id.
    pub fn doc_auto(&self) -> DocumentReference {
        let id = self.firestore.inner.store.next_auto_id();
        DocumentReference::new(
            self.firestore.clone(),
            self.path.child(&id),
            Arc::clone(&self.converter),
        )
    }

    /// Write `value` to a document under a fresh generated id and return
    /// its reference.
    pub async fn add(&self, value: Value) -> FirestoreResult<DocumentReference> {
        let doc = self.doc_auto();
        doc.set(value, SetOptions::default()).await?;
        Ok(doc)
    }

    /// Read the current membership.
    pub async fn get(&self) -> FirestoreResult<QuerySnapshot> {
        Ok(self.current_snapshot())
    }

    /// Register a listener. Delivered the current membership immediately,
    /// then a fresh [`QuerySnapshot`] after every write, patch, or delete of
    /// any descendant document.
    pub fn on_snapshot(&self, args: QueryObserverArgs) -> QuerySubscription {
        let observer = Observer::normalize(args);
        (observer.next)(&self.current_snapshot());

        let emitter = self
            .firestore
            .inner
            .coll_events
            .emitter_for(&self.path.to_string());
        let id = emitter.subscribe(observer);
        Subscription::new(emitter, id)
    }

    /// A new handle at the same path with a different converter. The
    /// receiver is unchanged.
    pub fn with_converter(&self, converter: Arc<dyn DataConverter>) -> CollectionReference {
        CollectionReference::new(self.firestore.clone(), self.path.clone(), converter)
    }

    /// Behavioral equality: same store instance, same canonical path, same
    /// converter instance.
    pub fn is_equal(&self, other: &CollectionReference) -> bool {
        self.firestore.same_instance(&other.firestore)
            && self.path == other.path
            && Arc::ptr_eq(&self.converter, &other.converter)
    }

    /// This collection as a query root.
    pub fn query(&self) -> Query {
        Query::new(self.clone())
    }

    pub(crate) fn current_snapshot(&self) -> QuerySnapshot {
        let docs = self
            .firestore
            .inner
            .store
            .direct_children(&self.path)
            .into_iter()
            .map(|path| {
                DocumentReference::new(self.firestore.clone(), path, Arc::clone(&self.converter))
                    .current_snapshot()
            })
            .collect();
        QuerySnapshot::new(self.clone(), docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::IdentityConverter;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn exposes_id_path_and_parents() {
        let firestore = Firestore::new();
        let root = firestore.collection("foo").unwrap();
        assert_eq!(root.id(), "foo");
        assert_eq!(root.path(), "/foo");
        assert!(root.parent().is_none());

        let nested = firestore.collection("foo/bar/baz").unwrap();
        assert_eq!(nested.id(), "baz");
        assert_eq!(nested.parent().unwrap().path(), "/foo/bar");
    }

    #[test]
    fn doc_validates_the_member_id() {
        let firestore = Firestore::new();
        let collection = firestore.collection("foo").unwrap();
        assert_eq!(collection.doc("bar").unwrap().path(), "/foo/bar");
        // A slash in the id would change the path parity.
        assert!(collection.doc("bar/baz").is_err());
    }

    #[test]
    fn doc_auto_generates_sequential_ids() {
        let firestore = Firestore::new();
        let collection = firestore.collection("foo").unwrap();
        let first = collection.doc_auto();
        let second = collection.doc_auto();

        assert_eq!(first.id(), "__id0");
        assert_eq!(second.id(), "__id1");
        assert_eq!(first.path(), "/foo/__id0");
    }

    #[tokio::test]
    async fn add_stores_under_a_fresh_id() {
        let firestore = Firestore::new();
        let collection = firestore.collection("foo").unwrap();
        let doc = collection.add(json!({"n": 1})).await.unwrap();

        assert_eq!(doc.get().await.unwrap().data(), Some(json!({"n": 1})));
        assert_eq!(collection.get().await.unwrap().size(), 1);
    }

    #[tokio::test]
    async fn get_lists_direct_children_only() {
        let firestore = Firestore::new();
        firestore
            .doc("foo/b")
            .unwrap()
            .set(json!({"n": 2}), SetOptions::default())
            .await
            .unwrap();
        firestore
            .doc("foo/a")
            .unwrap()
            .set(json!({"n": 1}), SetOptions::default())
            .await
            .unwrap();
        firestore
            .doc("foo/a/sub/deep")
            .unwrap()
            .set(json!({"n": 3}), SetOptions::default())
            .await
            .unwrap();

        let snapshot = firestore.collection("foo").unwrap().get().await.unwrap();
        let ids: Vec<&str> = snapshot.docs().iter().map(|doc| doc.id()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn on_snapshot_fires_for_every_descendant_write() {
        let firestore = Firestore::new();
        let collection = firestore.collection("foo").unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let subscription = collection.on_snapshot(ObserverArgs::next(move |_: &QuerySnapshot| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // A direct child and a deeply nested descendant both count.
        firestore
            .doc("foo/bar")
            .unwrap()
            .set(json!({"n": 1}), SetOptions::default())
            .await
            .unwrap();
        firestore
            .doc("foo/bar/baz/qux")
            .unwrap()
            .set(json!({"n": 2}), SetOptions::default())
            .await
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 3);

        subscription.unsubscribe();
        firestore
            .doc("foo/bar")
            .unwrap()
            .delete()
            .await
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn listener_snapshots_track_membership() {
        let firestore = Firestore::new();
        let collection = firestore.collection("foo").unwrap();
        let doc = collection.doc("bar").unwrap();

        let sizes = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&sizes);
        collection.on_snapshot(ObserverArgs::next(move |snapshot: &QuerySnapshot| {
            sink.lock().unwrap().push(snapshot.size());
        }));

        doc.set(json!({"n": 1}), SetOptions::default()).await.unwrap();
        doc.delete().await.unwrap();
        assert_eq!(*sizes.lock().unwrap(), vec![0, 1, 0]);
    }

    #[test]
    fn is_equal_requires_store_path_and_converter() {
        let firestore = Firestore::new();
        let collection = firestore.collection("foo").unwrap();
        assert!(collection.is_equal(&firestore.collection("foo").unwrap()));
        assert!(!collection.is_equal(&firestore.collection("bar").unwrap()));
        assert!(!collection.is_equal(&Firestore::new().collection("foo").unwrap()));
        assert!(!collection
            .is_equal(&collection.with_converter(Arc::new(IdentityConverter))));
    }
}
