//! Top-level firemock surface.
//!
//! [`MockApp`] aggregates one document-store instance and one auth instance
//! under a name, the way client SDKs hand out per-app service handles. All
//! state is in memory and is discarded when the last handle drops.

use tracing::debug;

pub use firemock_auth::{Auth, AuthError, AuthObserverArgs, AuthSubscription, User, UserCredential};
pub use firemock_firestore::{
    CollectionReference, DataConverter, DocumentObserverArgs, DocumentReference, DocumentSnapshot,
    DocumentSubscription, Firestore, FirestoreError, IdentityConverter, Observer, ObserverArgs,
    Query, QueryObserverArgs, QuerySnapshot, QuerySubscription, ServerTimestamps, SetOptions,
    SnapshotOptions, UpdateArgs,
};
pub use firemock_types::{CanonicalPath, DocumentData, PathKind};

/// A named application handle owning one [`Firestore`] and one [`Auth`]
/// instance.
///
/// Cloning the app, or the services it hands out, never copies state;
/// everything observes the same instances.
#[derive(Clone)]
pub struct MockApp {
    name: String,
    firestore: Firestore,
    auth: Auth,
}

impl Default for MockApp {
    fn default() -> Self {
        Self::new("[DEFAULT]")
    }
}

impl MockApp {
    pub fn new(name: &str) -> Self {
        debug!(name, "mock app created");
        Self {
            name: name.to_string(),
            firestore: Firestore::new(),
            auth: Auth::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A handle to this app's document store.
    pub fn firestore(&self) -> Firestore {
        self.firestore.clone()
    }

    /// A handle to this app's identity mock.
    pub fn auth(&self) -> Auth {
        self.auth.clone()
    }
}
