use crate::db::{NewUser, Store, User, UserId};
use crate::error::IntakeError;
use crate::service::password::{hash_password, verify_password};
use crate::service::sanitize::clean_username;
use tracing::debug;

/// Outcome of a credential check. A wrong password is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    Matched(User),
    NoMatch,
}

/// User lookups for authentication.
///
/// Every lookup reloads the whole `users` table and scans it; there is no cache.
#[derive(Clone)]
pub struct UserDirectory {
    store: Store,
}

impl UserDirectory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// `username` is compared after the same cleaning registration applies.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, IntakeError> {
        let username = clean_username(username);
        let users = self.store.select_users().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, IntakeError> {
        let users = self.store.select_users().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Hash the password and insert the user. Hashing runs on the blocking pool.
    pub async fn register(
        &self,
        username: String,
        password: &str,
        name: String,
        email: String,
    ) -> Result<(), IntakeError> {
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
        self.store
            .insert_user(NewUser {
                username,
                password_hash,
                name,
                email,
            })
            .await
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credentials, IntakeError> {
        let Some(user) = self.find_by_username(username).await? else {
            debug!(username, "login for unknown user");
            return Ok(Credentials::NoMatch);
        };

        let password = password.to_owned();
        let hash = user.password.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;

        if valid {
            Ok(Credentials::Matched(user))
        } else {
            Ok(Credentials::NoMatch)
        }
    }
}
