//! Canonical slash-delimited paths.
//!
//! A canonical path is a normalized sequence of non-empty segments that
//! alternate collection-id / document-id, starting with a collection.
//! The segment count therefore classifies the path: odd means collection,
//! even means document. Parsing normalizes away empty segments, so
//! `"foo//bar/"` and `"/foo/bar"` resolve to the same path.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};

/// Classification of a canonical path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Odd segment count: the path addresses a collection.
    Collection,
    /// Even segment count: the path addresses a document.
    Document,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Document => write!(f, "document"),
        }
    }
}

/// A normalized, validated path into the document graph.
///
/// Paths render with a leading slash (`/users/alice/posts/1`). They are the
/// sole key into the document store: two independently created paths with the
/// same segments are equal and address the same stored value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalPath {
    segments: Vec<String>,
}

impl CanonicalPath {
    /// Parse a raw slash-delimited string, requiring the given kind.
    ///
    /// Splits on `/` and drops empty segments. Fails with
    /// [`PathError::InvalidPath`] when the resulting segment count does not
    /// match the requested kind (or is zero).
    pub fn parse(raw: &str, kind: PathKind) -> Result<Self> {
        let segments: Vec<String> = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let odd = segments.len() % 2 == 1;
        let wants_odd = kind == PathKind::Collection;
        if segments.is_empty() || odd != wants_odd {
            return Err(PathError::InvalidPath {
                path: raw.to_string(),
                expected: kind,
                segments: segments.len(),
            });
        }

        Ok(Self { segments })
    }

    /// The kind implied by this path's segment parity.
    pub fn kind(&self) -> PathKind {
        if self.segments.len() % 2 == 1 {
            PathKind::Collection
        } else {
            PathKind::Document
        }
    }

    /// The final segment: the collection or document id this path names.
    pub fn id(&self) -> &str {
        // Parsing rejects empty paths, so the last segment always exists.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The path one level up, or `None` at the root.
    ///
    /// A document's parent is always a collection and vice versa.
    pub fn parent(&self) -> Option<CanonicalPath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Extend this path with one child segment.
    ///
    /// The segment must be a single non-empty id; multi-segment relative
    /// paths go through [`CanonicalPath::parse`] on the joined string.
    pub fn child(&self, segment: &str) -> CanonicalPath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Walk the parent chain upward one level at a time, root-most last.
    ///
    /// For `/a/b/c/d` this yields `/a/b/c`, `/a/b`, `/a`. Used by the
    /// notification engine to bubble document changes to ancestor
    /// collections.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            current: self.parent(),
        }
    }

    /// The normalized segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalPath({self})")
    }
}

/// Iterator over a path's ancestors, nearest first.
pub struct Ancestors {
    current: Option<CanonicalPath>,
}

impl Iterator for Ancestors {
    type Item = CanonicalPath;

    fn next(&mut self) -> Option<CanonicalPath> {
        let next = self.current.take()?;
        self.current = next.parent();
        Some(next)
    }
}
