use thiserror::Error;

/// Failures surfaced by sign-in and account creation.
///
/// Message prefixes match the `auth/...` error codes client code matches
/// against.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("auth/email-already-in-use: the email address is already in use by another account")]
    EmailAlreadyInUse,

    #[error("auth/user-not-found: there is no user record corresponding to this identifier")]
    UserNotFound,

    #[error("auth/wrong-password: the password is invalid for the given email")]
    WrongPassword,
}

impl AuthError {
    /// The stable `auth/...` code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthError::UserNotFound => "auth/user-not-found",
            AuthError::WrongPassword => "auth/wrong-password",
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_start_with_their_code() {
        for error in [
            AuthError::EmailAlreadyInUse,
            AuthError::UserNotFound,
            AuthError::WrongPassword,
        ] {
            assert!(error.to_string().starts_with(error.code()));
        }
    }
}
