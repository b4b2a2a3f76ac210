//! In-memory document database emulation.
//!
//! This crate is the core of firemock: a hierarchical, path-addressed
//! document store with partial/merge writes and push-based change
//! notification, sufficient for client code to exercise realistic
//! read/write/subscribe behavior without a live backend.
//!
//! # Architecture
//!
//! - [`Firestore`] — cheap clone handle over one store instance; resolves
//!   paths into references
//! - [`CollectionReference`] / [`DocumentReference`] — pure value handles
//!   identified by store + canonical path + converter; freely re-creatable,
//!   structurally comparable via `is_equal`
//! - [`DocumentSnapshot`] / [`QuerySnapshot`] — immutable point-in-time
//!   views, re-materialized for every read and every notification
//! - [`DataConverter`] — pluggable translation between external values and
//!   the raw stored mapping; identity by default
//!
//! A mutation updates the store, then notifies the document path's emitter
//! with a fresh snapshot and bubbles to every ancestor collection's emitter,
//! all synchronously before the operation's future resolves. Notification
//! fires only when the stored value actually changed.
//!
//! Query filtering, transactions, and batched writes are deliberately not
//! part of the emulation and fail with [`FirestoreError::NotImplemented`].

pub mod collection;
pub mod converter;
pub mod document;
pub mod error;
pub mod firestore;
pub mod query;
pub mod snapshot;

pub use collection::{CollectionReference, QueryObserverArgs, QuerySnapshot, QuerySubscription};
pub use converter::{DataConverter, IdentityConverter, ServerTimestamps, SnapshotOptions};
pub use document::{
    DocumentObserverArgs, DocumentReference, DocumentSubscription, SetOptions, UpdateArgs,
};
pub use error::{FirestoreError, FirestoreResult};
pub use firestore::{Firestore, Transaction, WriteBatch};
pub use query::Query;
pub use snapshot::DocumentSnapshot;

// Re-export the listener building blocks callers need for `on_snapshot`.
pub use firemock_events::{Observer, ObserverArgs};
