use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AuthError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    /// Avatar initial.
    pub letter: Option<char>,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}

/// Where accounts live. The summarization path never touches it.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fails with [`AuthError::UsernameTaken`] if the username exists.
    async fn create_user(&self, new_user: NewUser) -> Result<User, AuthError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;
}

/// First ASCII letter of the username, uppercased.
#[must_use]
pub fn first_letter(username: &str) -> Option<char> {
    username
        .chars()
        .find(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
}

#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.username) {
            return Err(AuthError::UsernameTaken);
        }

        let user = User {
            id: Uuid::new_v4(),
            letter: first_letter(&new_user.username),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: None,
            password_hash: "1$00$00".to_string(),
        }
    }

    #[test]
    fn test_first_letter() {
        assert_eq!(first_letter("alice"), Some('A'));
        assert_eq!(first_letter("_42bob"), Some('B'));
        assert_eq!(first_letter("1234"), None);
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryCredentialStore::new();
        let user = store.create_user(new_user("makky")).await.unwrap();
        assert_eq!(user.letter, Some('M'));

        let by_name = store.find_by_username("makky").await.unwrap();
        assert_eq!(by_name.as_ref().map(|u| u.id), Some(user.id));

        let by_id = store.find_by_id(user.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.username), Some("makky".to_string()));

        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = InMemoryCredentialStore::new();
        store.create_user(new_user("makky")).await.unwrap();
        let err = store.create_user(new_user("makky")).await.unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }
}
