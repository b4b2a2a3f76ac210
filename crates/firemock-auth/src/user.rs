use serde::{Deserialize, Serialize};

/// A registered account or anonymous session record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_anonymous: bool,
    /// Identifies how the account was established, `"password"` or
    /// `"anonymous"`.
    pub provider_id: String,
    #[serde(skip)]
    pub(crate) password: Option<String>,
}

impl User {
    pub(crate) fn password_matches(&self, password: &str) -> bool {
        self.password.as_deref() == Some(password)
    }
}

/// Fields for a record about to be added to a [`UserStore`](crate::UserStore),
/// which assigns the uid.
#[derive(Clone, Debug, Default)]
pub struct NewUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub is_anonymous: bool,
}

impl NewUser {
    /// An email/password account.
    pub fn with_password(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            ..Self::default()
        }
    }

    /// An anonymous session record.
    pub fn anonymous() -> Self {
        Self {
            is_anonymous: true,
            ..Self::default()
        }
    }
}
