//! The auth handle: account creation, sign-in state, and its listeners.

use std::sync::{Arc, RwLock};

use tracing::debug;

use firemock_events::{Emitter, Observer, ObserverArgs, Subscription};

use crate::error::{AuthError, AuthResult};
use crate::store::UserStore;
use crate::user::{NewUser, User};

/// Registration call shapes for auth state listeners. Listeners receive the
/// current identity, `None` when signed out.
pub type AuthObserverArgs = ObserverArgs<Option<User>, AuthError>;

/// Handle to one registered auth state listener.
pub type AuthSubscription = Subscription<Option<User>, AuthError>;

/// Outcome of a successful sign-in or account creation.
#[derive(Clone, Debug)]
pub struct UserCredential {
    pub user: User,
}

struct Inner {
    users: UserStore,
    current: RwLock<Option<User>>,
    state_events: Arc<Emitter<Option<User>, AuthError>>,
}

/// Cheap clone handle over one identity mock instance.
///
/// All clones share the same user records, current identity, and listener
/// list. State changes are pushed to listeners before the operation's
/// future resolves.
#[derive(Clone)]
pub struct Auth {
    inner: Arc<Inner>,
}

impl Default for Auth {
    fn default() -> Self {
        Self::new()
    }
}

impl Auth {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                users: UserStore::new(),
                current: RwLock::new(None),
                state_events: Arc::new(Emitter::new()),
            }),
        }
    }

    /// The signed-in identity, if any.
    pub fn current_user(&self) -> Option<User> {
        self.inner.current.read().expect("lock poisoned").clone()
    }

    /// Whether two handles observe the same instance.
    pub fn same_instance(&self, other: &Auth) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Register an account and sign it in.
    pub async fn create_user_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<UserCredential> {
        if self.inner.users.find_by_email(email).is_some() {
            return Err(AuthError::EmailAlreadyInUse);
        }
        let user = self.inner.users.add(NewUser::with_password(email, password));
        self.set_current(Some(user.clone()));
        Ok(UserCredential { user })
    }

    /// Sign in to an existing account.
    pub async fn sign_in_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<UserCredential> {
        let Some(user) = self.inner.users.find_by_email(email) else {
            return Err(AuthError::UserNotFound);
        };
        if !user.password_matches(password) {
            return Err(AuthError::WrongPassword);
        }
        self.set_current(Some(user.clone()));
        Ok(UserCredential { user })
    }

    /// Start (or resume) an anonymous session.
    ///
    /// If the current identity is already anonymous it is reused; no second
    /// record is created and listeners are not re-notified.
    pub async fn sign_in_anonymously(&self) -> AuthResult<UserCredential> {
        if let Some(current) = self.current_user() {
            if current.is_anonymous {
                return Ok(UserCredential { user: current });
            }
        }
        let user = self.inner.users.add(NewUser::anonymous());
        self.set_current(Some(user.clone()));
        Ok(UserCredential { user })
    }

    /// Clear the current identity. Listeners receive `None`.
    pub async fn sign_out(&self) -> AuthResult<()> {
        self.set_current(None);
        Ok(())
    }

    /// Register a listener for identity changes.
    ///
    /// The listener is invoked immediately with the current identity, then
    /// once per sign-in and sign-out.
    pub fn on_auth_state_changed(&self, args: AuthObserverArgs) -> AuthSubscription {
        let observer = Observer::normalize(args);
        (observer.next)(&self.current_user());

        let id = self.inner.state_events.subscribe(observer);
        Subscription::new(Arc::clone(&self.inner.state_events), id)
    }

    fn set_current(&self, user: Option<User>) {
        debug!(
            uid = user.as_ref().map(|user| user.uid.as_str()),
            "auth state changed"
        );
        *self.inner.current.write().expect("lock poisoned") = user.clone();
        self.inner.state_events.emit(&user);
    }
}
