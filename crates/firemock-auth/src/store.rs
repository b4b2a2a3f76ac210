use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;
use uuid::Uuid;

use crate::user::{NewUser, User};

/// In-memory user records, keyed by uid.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under a freshly assigned uid and return it.
    pub fn add(&self, new_user: NewUser) -> User {
        let user = User {
            uid: Uuid::now_v7().to_string(),
            email: new_user.email,
            display_name: new_user.display_name,
            is_anonymous: new_user.is_anonymous,
            provider_id: if new_user.is_anonymous {
                "anonymous".to_string()
            } else {
                "password".to_string()
            },
            password: new_user.password,
        };
        debug!(uid = %user.uid, anonymous = user.is_anonymous, "user added");
        self.users
            .write()
            .expect("lock poisoned")
            .insert(user.uid.clone(), user.clone());
        user
    }

    pub fn get(&self, uid: &str) -> Option<User> {
        self.users.read().expect("lock poisoned").get(uid).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .expect("lock poisoned")
            .values()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_unique_uids() {
        let store = UserStore::new();
        let first = store.add(NewUser::with_password("a@example.com", "pw"));
        let second = store.add(NewUser::with_password("b@example.com", "pw"));

        assert_ne!(first.uid, second.uid);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&first.uid), Some(first));
    }

    #[test]
    fn finds_records_by_email() {
        let store = UserStore::new();
        store.add(NewUser::with_password("a@example.com", "pw"));

        let found = store.find_by_email("a@example.com").unwrap();
        assert_eq!(found.email.as_deref(), Some("a@example.com"));
        assert_eq!(found.provider_id, "password");
        assert!(store.find_by_email("missing@example.com").is_none());
    }

    #[test]
    fn anonymous_records_carry_no_email() {
        let store = UserStore::new();
        let user = store.add(NewUser::anonymous());
        assert!(user.is_anonymous);
        assert!(user.email.is_none());
        assert_eq!(user.provider_id, "anonymous");
    }
}
