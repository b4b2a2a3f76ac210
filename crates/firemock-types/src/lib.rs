//! Foundation types for firemock.
//!
//! This crate provides the canonical path model and the raw document value
//! algebra used throughout the firemock workspace. Every other firemock
//! crate depends on `firemock-types`.
//!
//! # Key Types
//!
//! - [`CanonicalPath`] — Normalized slash-delimited address alternating
//!   collection and document segments
//! - [`PathKind`] — Classification of a path as collection or document
//! - [`DocumentData`] — Raw stored representation of a document: a nested
//!   mapping of string keys to JSON values
//!
//! # Write Algebra
//!
//! The pure functions in [`value`] implement the two write strategies of the
//! emulated protocol: [`value::shallow_merge`] (top-level overwrite of the
//! supplied keys) and [`value::apply_field_patch`] (deep dot-path patch
//! preserving unaddressed siblings at every nesting level).

pub mod error;
pub mod path;
pub mod value;

pub use error::PathError;
pub use path::{CanonicalPath, PathKind};
pub use value::{apply_field_patch, field_at, shallow_merge, DocumentData};
