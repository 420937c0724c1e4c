//! The persistence contract the authentication core depends on

use async_trait::async_trait;

use crate::users::User;

/// Read-only user access by e-mail or id
///
/// Errors are infrastructure faults (pool timeout, I/O); an unknown user is
/// `Ok(None)`.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    async fn by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub fn sample_user(id: &str, email: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: String::new(),
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: None,
        }
    }

    /// Lookup backed by a map keyed on e-mail
    #[derive(Default)]
    pub struct MemoryLookup {
        users: Mutex<HashMap<String, User>>,
    }

    impl MemoryLookup {
        pub fn insert(&self, user: User) {
            self.users.lock().unwrap().insert(user.email.clone(), user);
        }

        pub fn remove(&self, email: &str) {
            self.users.lock().unwrap().remove(email);
        }
    }

    #[async_trait]
    impl UserLookup for MemoryLookup {
        async fn by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
            Ok(self.users.lock().unwrap().get(email).cloned())
        }

        async fn by_id(&self, id: &str) -> Result<Option<User>, sqlx::Error> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.id == id)
                .cloned())
        }
    }

    /// Lookup whose backing store is unreachable
    pub struct FailingLookup;

    #[async_trait]
    impl UserLookup for FailingLookup {
        async fn by_email(&self, _email: &str) -> Result<Option<User>, sqlx::Error> {
            Err(sqlx::Error::PoolTimedOut)
        }

        async fn by_id(&self, _id: &str) -> Result<Option<User>, sqlx::Error> {
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}
