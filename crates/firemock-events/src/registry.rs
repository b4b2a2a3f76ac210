//! Per-path emitter registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::emitter::Emitter;

/// Map from canonical-path keys to shared emitters.
///
/// Emitters are created on first access and cached for the registry's
/// lifetime; entries are never removed, so a listener registering on a path
/// after its document was deleted still resolves to the same emitter every
/// earlier listener used.
pub struct EmitterRegistry<T, E> {
    emitters: RwLock<HashMap<String, Arc<Emitter<T, E>>>>,
}

impl<T, E> EmitterRegistry<T, E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            emitters: RwLock::new(HashMap::new()),
        }
    }

    /// Create-or-return the emitter for a key. Idempotent: every call with
    /// the same key yields the same shared emitter.
    pub fn emitter_for(&self, key: &str) -> Arc<Emitter<T, E>> {
        if let Some(emitter) = self
            .emitters
            .read()
            .expect("registry lock poisoned")
            .get(key)
        {
            return Arc::clone(emitter);
        }

        let mut emitters = self.emitters.write().expect("registry lock poisoned");
        Arc::clone(
            emitters
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Emitter::new())),
        )
    }

    /// Number of distinct keys that have been accessed.
    pub fn len(&self) -> usize {
        self.emitters.read().expect("registry lock poisoned").len()
    }

    /// Returns `true` if no emitter has been created yet.
    pub fn is_empty(&self) -> bool {
        self.emitters.read().expect("registry lock poisoned").is_empty()
    }
}

impl<T, E> Default for EmitterRegistry<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::Observer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type TestRegistry = EmitterRegistry<u32, String>;

    #[test]
    fn emitter_for_is_idempotent() {
        let registry = TestRegistry::new();
        let a = registry.emitter_for("/foo/bar");
        let b = registry.emitter_for("/foo/bar");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_emitters() {
        let registry = TestRegistry::new();
        let a = registry.emitter_for("/foo/bar");
        let b = registry.emitter_for("/foo/baz");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn late_subscribers_reach_earlier_listeners_emitter() {
        let registry = TestRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        let early = registry.emitter_for("/users/alice");
        let seen = Arc::clone(&count);
        early.subscribe(Observer::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        // A later lookup goes through the cache and reaches the same
        // listener list.
        registry.emitter_for("/users/alice").emit(&1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
