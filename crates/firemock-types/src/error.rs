//! Error types for path resolution.

use thiserror::Error;

use crate::path::PathKind;

/// Errors produced by path parsing and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path has the wrong segment parity for the requested reference
    /// kind: collection paths need an odd number of segments, document paths
    /// an even, non-zero number.
    #[error("not a {expected} path: {path:?} resolves to {segments} segment(s)")]
    InvalidPath {
        path: String,
        expected: PathKind,
        segments: usize,
    },
}

/// Convenience alias for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
