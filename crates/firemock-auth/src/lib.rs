//! Credential and session emulation.
//!
//! A self-contained identity mock: email/password accounts and anonymous
//! sessions kept in memory, with a listener list that is told about every
//! change of the current identity. Shares no state with the document store;
//! the two mocks only meet inside an application handle.

pub mod auth;
pub mod error;
pub mod store;
pub mod user;

pub use auth::{Auth, AuthObserverArgs, AuthSubscription, UserCredential};
pub use error::{AuthError, AuthResult};
pub use store::UserStore;
pub use user::{NewUser, User};
