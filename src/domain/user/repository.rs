use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{NewUser, User};
use crate::domain::DomainResult;

/// Persistence boundary for user accounts.
///
/// The concrete document store lives behind this trait; the service
/// layer never sees a database handle. Email uniqueness is enforced
/// here: `create_user` fails with `DomainError::Conflict` for a
/// duplicate address.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_reset_digest(&self, digest: &str) -> DomainResult<Option<User>>;

    /// Replace the credential hash, stamp the change time and clear any
    /// outstanding reset token in one step.
    async fn update_password(
        &self,
        id: &str,
        new_hash: &str,
        changed_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Store a reset-token digest and its expiry, touching nothing
    /// else on the record.
    async fn set_reset_token(
        &self,
        id: &str,
        digest: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Remove an outstanding reset token (used both after a successful
    /// reset and for the delivery-failure rollback).
    async fn clear_reset_token(&self, id: &str) -> DomainResult<()>;
}
