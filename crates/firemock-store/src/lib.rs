//! Process-local document storage for firemock.
//!
//! [`DocumentStore`] holds every document of one store instance, keyed by
//! canonical path. Reference handles are pure values; the store is the only
//! shared mutable state, so any two handles resolving to the same path
//! observe the same entry. Data lives in memory behind a `RwLock` and is
//! discarded when the store drops — there is no persistence layer.

pub mod store;

pub use store::DocumentStore;
