//! Fan-out delivery to ordered listener lists.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::observer::Observer;

/// Identifier for one registered listener, unique per emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry<T, E> {
    id: ListenerId,
    observer: Arc<Observer<T, E>>,
}

/// An ordered listener list with fan-out delivery.
///
/// Emission snapshots the current listener list before invoking any
/// callback, so a callback that registers or removes listeners on the same
/// emitter neither corrupts iteration nor receives the in-flight emission.
pub struct Emitter<T, E> {
    listeners: Mutex<Vec<Entry<T, E>>>,
    next_id: AtomicU64,
}

impl<T, E> Emitter<T, E> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register an observer, appending it to the delivery order.
    pub fn subscribe(&self, observer: Observer<T, E>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().expect("listener lock poisoned").push(Entry {
            id,
            observer: Arc::new(observer),
        });
        debug!(listener = id.0, "listener subscribed");
        id
    }

    /// Remove exactly the listener with the given id.
    ///
    /// Returns `false` when the id is unknown or already removed, so calling
    /// this twice is a no-op.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().expect("listener lock poisoned");
        let before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        let removed = listeners.len() < before;
        if removed {
            debug!(listener = id.0, "listener unsubscribed");
        }
        removed
    }

    /// Deliver a value to every listener registered before this call.
    pub fn emit(&self, value: &T) {
        for observer in self.current_observers() {
            (observer.next)(value);
        }
    }

    /// Deliver an error to every listener that registered an error callback.
    pub fn emit_error(&self, error: &E) {
        for observer in self.current_observers() {
            if let Some(on_error) = &observer.error {
                on_error(error);
            }
        }
    }

    /// Signal completion to every listener that registered for it.
    pub fn emit_complete(&self) {
        for observer in self.current_observers() {
            if let Some(on_complete) = &observer.complete {
                on_complete();
            }
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().expect("listener lock poisoned").len()
    }

    // Snapshot the list so callbacks run without the lock held.
    fn current_observers(&self) -> Vec<Arc<Observer<T, E>>> {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .iter()
            .map(|entry| Arc::clone(&entry.observer))
            .collect()
    }
}

impl<T, E> Default for Emitter<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to one registration on one emitter.
///
/// `unsubscribe` removes exactly this listener and leaves others untouched.
pub struct Subscription<T, E> {
    emitter: Arc<Emitter<T, E>>,
    id: ListenerId,
}

impl<T, E> Subscription<T, E> {
    /// Pair an emitter with a listener id.
    pub fn new(emitter: Arc<Emitter<T, E>>, id: ListenerId) -> Self {
        Self { emitter, id }
    }

    /// Remove this subscription's listener. Calling more than once is a
    /// no-op; returns whether a listener was actually removed.
    pub fn unsubscribe(&self) -> bool {
        self.emitter.unsubscribe(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    type TestEmitter = Emitter<u32, String>;

    fn counting_observer(count: &Arc<AtomicUsize>) -> Observer<u32, String> {
        let count = Arc::clone(count);
        Observer::new(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn emit_reaches_all_listeners_in_order() {
        let emitter = TestEmitter::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            emitter.subscribe(Observer::new(move |value: &u32| {
                order.lock().unwrap().push((tag, *value));
            }));
        }

        emitter.emit(&9);
        assert_eq!(
            *order.lock().unwrap(),
            vec![("first", 9), ("second", 9), ("third", 9)]
        );
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let emitter = TestEmitter::new();
        let kept = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicUsize::new(0));

        emitter.subscribe(counting_observer(&kept));
        let id = emitter.subscribe(counting_observer(&dropped));

        assert!(emitter.unsubscribe(id));
        emitter.emit(&1);

        assert_eq!(kept.load(Ordering::SeqCst), 1);
        assert_eq!(dropped.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribe_twice_is_noop() {
        let emitter = TestEmitter::new();
        let id = emitter.subscribe(Observer::new(|_| {}));
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn reentrant_subscribe_does_not_receive_inflight_emission() {
        let emitter = Arc::new(TestEmitter::new());
        let late = Arc::new(AtomicUsize::new(0));

        {
            let emitter = Arc::clone(&emitter);
            let late = Arc::clone(&late);
            emitter.clone().subscribe(Observer::new(move |_| {
                emitter.subscribe(counting_observer(&late));
            }));
        }

        emitter.emit(&1);
        assert_eq!(late.load(Ordering::SeqCst), 0);

        // The listener added during the first emission sees the next one.
        emitter.emit(&2);
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn error_and_complete_reach_registered_callbacks() {
        let emitter = TestEmitter::new();
        let errors = Arc::new(AtomicUsize::new(0));
        let completions = Arc::new(AtomicUsize::new(0));

        let errors_seen = Arc::clone(&errors);
        let completions_seen = Arc::clone(&completions);
        emitter.subscribe(Observer {
            next: Box::new(|_| {}),
            error: Some(Box::new(move |_: &String| {
                errors_seen.fetch_add(1, Ordering::SeqCst);
            })),
            complete: Some(Box::new(move || {
                completions_seen.fetch_add(1, Ordering::SeqCst);
            })),
        });
        // A next-only listener is unaffected by error/complete signals.
        emitter.subscribe(Observer::new(|_| {}));

        emitter.emit_error(&"boom".to_string());
        emitter.emit_complete();

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscription_handle_unsubscribes_idempotently() {
        let emitter = Arc::new(TestEmitter::new());
        let count = Arc::new(AtomicUsize::new(0));

        let id = emitter.subscribe(counting_observer(&count));
        let subscription = Subscription::new(Arc::clone(&emitter), id);

        emitter.emit(&1);
        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
        emitter.emit(&2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
