//! Callback-based event delivery for firemock.
//!
//! The emulated protocol pushes values into caller-supplied closures rather
//! than over channels: a listener registers a `{next, error, complete}`
//! record and receives every subsequent emission synchronously. This crate
//! provides that machinery, generic over the emitted value and error types:
//!
//! - [`Observer`] — the canonical callback record
//! - [`ObserverArgs`] — the accepted registration call shapes, collapsed into
//!   an [`Observer`] by one pure normalization step
//! - [`Emitter`] — an ordered listener list with fan-out delivery that is
//!   safe under re-entrant registration
//! - [`EmitterRegistry`] — lazily populated map from canonical-path keys to
//!   shared emitters; entries persist for the registry's lifetime
//! - [`Subscription`] — a handle with an idempotent `unsubscribe`

pub mod emitter;
pub mod observer;
pub mod registry;

pub use emitter::{Emitter, ListenerId, Subscription};
pub use observer::{CompleteFn, ErrorFn, NextFn, Observer, ObserverArgs};
pub use registry::EmitterRegistry;
