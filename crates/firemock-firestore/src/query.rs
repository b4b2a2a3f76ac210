//! Query surface.
//!
//! The query API is present so callers can hold and pass query values, but
//! filtering, ordering, and pagination are not emulated: every combinator
//! and execution fails `NotImplemented`. Collection membership reads go
//! through [`CollectionReference::get`] instead.

use serde_json::Value;

use crate::collection::{CollectionReference, QuerySnapshot};
use crate::error::{FirestoreError, FirestoreResult};

/// A query rooted at one collection.
#[derive(Clone)]
pub struct Query {
    collection: CollectionReference,
}

impl Query {
    pub(crate) fn new(collection: CollectionReference) -> Self {
        Self { collection }
    }

    /// The collection this query is rooted at.
    pub fn collection(&self) -> &CollectionReference {
        &self.collection
    }

    pub fn where_field(&self, _field: &str, _op: &str, _value: Value) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::where_field"))
    }

    pub fn order_by(&self, _field: &str) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::order_by"))
    }

    pub fn limit(&self, _count: usize) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::limit"))
    }

    pub fn limit_to_last(&self, _count: usize) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::limit_to_last"))
    }

    pub fn start_at(&self, _value: Value) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::start_at"))
    }

    pub fn start_after(&self, _value: Value) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::start_after"))
    }

    pub fn end_before(&self, _value: Value) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::end_before"))
    }

    pub fn end_at(&self, _value: Value) -> FirestoreResult<Query> {
        Err(Self::not_implemented("Query::end_at"))
    }

    pub async fn get(&self) -> FirestoreResult<QuerySnapshot> {
        Err(Self::not_implemented("Query::get"))
    }

    fn not_implemented(operation: &str) -> FirestoreError {
        FirestoreError::NotImplemented {
            operation: operation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::firestore::Firestore;
    use serde_json::json;

    #[tokio::test]
    async fn every_query_operation_reports_not_implemented() {
        let firestore = Firestore::new();
        let query = firestore.collection("foo").unwrap().query();

        assert!(matches!(
            query.where_field("n", "==", json!(1)),
            Err(FirestoreError::NotImplemented { .. })
        ));
        assert!(matches!(
            query.order_by("n"),
            Err(FirestoreError::NotImplemented { .. })
        ));
        assert!(matches!(
            query.limit(1),
            Err(FirestoreError::NotImplemented { .. })
        ));
        assert!(matches!(
            query.get().await,
            Err(FirestoreError::NotImplemented { .. })
        ));
        assert_eq!(query.collection().path(), "/foo");
    }
}
