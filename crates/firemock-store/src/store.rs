//! In-memory document store keyed by canonical path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::debug;

use firemock_types::{CanonicalPath, DocumentData};

/// Prefix for generated document ids.
const AUTO_ID_PREFIX: &str = "__id";

/// All document data owned by one store instance.
///
/// A path that is missing from the map is an absent document; writing it
/// makes it present, removing it makes it absent again. The store never
/// interprets document contents.
pub struct DocumentStore {
    documents: RwLock<HashMap<CanonicalPath, DocumentData>>,
    next_id: AtomicU64,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// The stored value at a path, or `None` when the document is absent.
    pub fn get(&self, path: &CanonicalPath) -> Option<DocumentData> {
        self.documents
            .read()
            .expect("store lock poisoned")
            .get(path)
            .cloned()
    }

    /// Unconditionally replace the stored value at a path.
    pub fn set(&self, path: CanonicalPath, data: DocumentData) {
        debug!(path = %path, keys = data.len(), "store document");
        self.documents
            .write()
            .expect("store lock poisoned")
            .insert(path, data);
    }

    /// Mark the document at a path absent. Returns whether it was present.
    pub fn remove(&self, path: &CanonicalPath) -> bool {
        let removed = self
            .documents
            .write()
            .expect("store lock poisoned")
            .remove(path)
            .is_some();
        if removed {
            debug!(path = %path, "remove document");
        }
        removed
    }

    /// Whether a document is currently present at the path.
    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.documents
            .read()
            .expect("store lock poisoned")
            .contains_key(path)
    }

    /// Sorted paths of present documents exactly one level below the given
    /// collection path.
    pub fn direct_children(&self, collection: &CanonicalPath) -> Vec<CanonicalPath> {
        let documents = self.documents.read().expect("store lock poisoned");
        let mut children: Vec<CanonicalPath> = documents
            .keys()
            .filter(|path| {
                path.segments().len() == collection.segments().len() + 1
                    && path.segments().starts_with(collection.segments())
            })
            .cloned()
            .collect();
        children.sort();
        children
    }

    /// Next generated document id, unique for this store's lifetime.
    pub fn next_auto_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{AUTO_ID_PREFIX}{n}")
    }

    /// Number of present documents.
    pub fn len(&self) -> usize {
        self.documents.read().expect("store lock poisoned").len()
    }

    /// Returns `true` when no document is present.
    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("store lock poisoned").is_empty()
    }

    /// Drop every document. Auto-id state is not reset.
    pub fn clear(&self) {
        self.documents.write().expect("store lock poisoned").clear();
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firemock_types::PathKind;
    use serde_json::json;

    fn doc_path(raw: &str) -> CanonicalPath {
        CanonicalPath::parse(raw, PathKind::Document).unwrap()
    }

    fn coll_path(raw: &str) -> CanonicalPath {
        CanonicalPath::parse(raw, PathKind::Collection).unwrap()
    }

    fn data(value: serde_json::Value) -> DocumentData {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = DocumentStore::new();
        let path = doc_path("foo/bar");

        assert!(store.get(&path).is_none());
        store.set(path.clone(), data(json!({"a": 1})));
        assert_eq!(store.get(&path), Some(data(json!({"a": 1}))));
    }

    #[test]
    fn independently_parsed_paths_share_the_entry() {
        let store = DocumentStore::new();
        store.set(doc_path("foo/bar"), data(json!({"a": 1})));
        assert_eq!(store.get(&doc_path("/foo//bar")), Some(data(json!({"a": 1}))));
    }

    #[test]
    fn remove_reports_prior_presence() {
        let store = DocumentStore::new();
        let path = doc_path("foo/bar");

        assert!(!store.remove(&path));
        store.set(path.clone(), data(json!({})));
        assert!(store.remove(&path));
        assert!(!store.remove(&path));
        assert!(store.get(&path).is_none());
    }

    #[test]
    fn direct_children_are_sorted_and_one_level_deep() {
        let store = DocumentStore::new();
        store.set(doc_path("foo/b"), data(json!({})));
        store.set(doc_path("foo/a"), data(json!({})));
        store.set(doc_path("foo/a/sub/deep"), data(json!({})));
        store.set(doc_path("other/x"), data(json!({})));

        let children = store.direct_children(&coll_path("foo"));
        let rendered: Vec<String> = children.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["/foo/a", "/foo/b"]);
    }

    #[test]
    fn auto_ids_increment_and_never_repeat() {
        let store = DocumentStore::new();
        assert_eq!(store.next_auto_id(), "__id0");
        assert_eq!(store.next_auto_id(), "__id1");

        // A different store starts its own sequence.
        assert_eq!(DocumentStore::new().next_auto_id(), "__id0");
    }

    #[test]
    fn clear_empties_but_keeps_id_sequence() {
        let store = DocumentStore::new();
        store.set(doc_path("foo/bar"), data(json!({"a": 1})));
        store.next_auto_id();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.next_auto_id(), "__id1");
    }
}
