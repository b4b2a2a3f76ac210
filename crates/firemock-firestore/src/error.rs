//! Error types for the document database emulation.

use thiserror::Error;

use firemock_types::PathError;

/// Errors surfaced by store, reference, and query operations.
///
/// Input-shape violations (`InvalidPath`, `UnsupportedOption`,
/// `NotImplemented`) fail before any mutation. `NotFound` is state-dependent
/// and only ever travels through an awaited completion. Nothing is retried;
/// the emulation is deterministic.
#[derive(Debug, Error)]
pub enum FirestoreError {
    /// Wrong odd/even segment count for the requested reference kind.
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    /// A write option the emulation does not implement.
    #[error("unsupported option: {option}")]
    UnsupportedOption { option: String },

    /// `update` targeted a document that does not exist.
    #[error("no document to update: {path}")]
    NotFound { path: String },

    /// An operation that is deliberately outside the emulation:
    /// query filters/ordering, transactions, batched writes.
    #[error("not implemented: {operation}")]
    NotImplemented { operation: String },
}

impl FirestoreError {
    /// Returns `true` for [`FirestoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type FirestoreResult<T> = Result<T, FirestoreError>;
