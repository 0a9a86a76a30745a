//! In-memory user storage for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::{DomainError, DomainResult, NewUser, User, UserRepositoryInterface};

/// DashMap-backed repository. Concurrent access is safe; same-account
/// write races are last-write-wins, matching the persistence contract.
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn create_user(&self, new_user: NewUser) -> DomainResult<User> {
        let duplicate = self
            .users
            .iter()
            .any(|entry| entry.value().email == new_user.email);
        if duplicate {
            return Err(DomainError::Conflict(format!(
                "Email '{}' is already registered",
                new_user.email
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            photo: new_user.photo,
            role: new_user.role,
            credential_hash: new_user.credential_hash,
            credential_changed_at: None,
            reset_token_digest: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        };

        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_reset_digest(&self, digest: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().reset_token_digest.as_deref() == Some(digest))
            .map(|entry| entry.value().clone()))
    }

    async fn update_password(
        &self,
        id: &str,
        new_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::Storage(format!("User '{}' not found", id)))?;
        user.credential_hash = new_hash.to_string();
        user.credential_changed_at = Some(changed_at);
        user.reset_token_digest = None;
        user.reset_token_expires_at = None;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: &str,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::Storage(format!("User '{}' not found", id)))?;
        user.reset_token_digest = Some(digest.to_string());
        user.reset_token_expires_at = Some(expires_at);
        Ok(())
    }

    async fn clear_reset_token(&self, id: &str) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::Storage(format!("User '{}' not found", id)))?;
        user.reset_token_digest = None;
        user.reset_token_expires_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use chrono::Duration;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            photo: "default.jpg".to_string(),
            role: UserRole::User,
            credential_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_find_back() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create_user(new_user("a@example.com")).await.unwrap();

        let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");

        let by_email = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(new_user("a@example.com")).await.unwrap();

        let err = repo.create_user(new_user("a@example.com")).await;
        assert!(matches!(err, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn reset_token_set_find_clear() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(new_user("a@example.com")).await.unwrap();

        let expires = Utc::now() + Duration::minutes(10);
        repo.set_reset_token(&user.id, "digest-1", expires)
            .await
            .unwrap();

        let found = repo.find_by_reset_digest("digest-1").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.reset_token_expires_at, Some(expires));

        repo.clear_reset_token(&user.id).await.unwrap();
        assert!(repo.find_by_reset_digest("digest-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn password_update_stamps_change_and_clears_reset_fields() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(new_user("a@example.com")).await.unwrap();
        repo.set_reset_token(&user.id, "digest-1", Utc::now())
            .await
            .unwrap();

        let changed_at = Utc::now();
        repo.update_password(&user.id, "new-hash", changed_at)
            .await
            .unwrap();

        let reloaded = repo.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.credential_hash, "new-hash");
        assert_eq!(reloaded.credential_changed_at, Some(changed_at));
        assert!(reloaded.reset_token_digest.is_none());
        assert!(reloaded.reset_token_expires_at.is_none());
    }
}
