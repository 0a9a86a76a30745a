//! Password-reset flow
//!
//! Orchestrates the reset-token codec, the user repository and the
//! email collaborator for "forgot password", "reset password" and
//! "change password while authenticated".

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::service::{normalize_email, validate_new_password};
use crate::domain::{AuthError, DomainError, DomainResult, UserRepositoryInterface};
use crate::domain::credential_change_timestamp;
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::crypto::reset_token::{generate_reset_token, reset_token_digest};
use crate::infrastructure::email::EmailSender;

pub struct PasswordResetService {
    users: Arc<dyn UserRepositoryInterface>,
    mailer: Arc<dyn EmailSender>,
    jwt_config: JwtConfig,
    /// Validity window for reset tokens
    reset_window: Duration,
    /// Base URL embedded into the emailed reset link
    public_base_url: String,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserRepositoryInterface>,
        mailer: Arc<dyn EmailSender>,
        jwt_config: JwtConfig,
        reset_token_minutes: i64,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            mailer,
            jwt_config,
            reset_window: Duration::minutes(reset_token_minutes),
            public_base_url: public_base_url.into(),
        }
    }

    /// Start a reset: store a token digest on the account and email the
    /// raw token. If delivery fails the stored digest is rolled back —
    /// an account must never hold a token its owner never received.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::NoSuchAccount.into());
        };

        let (raw_token, digest) = generate_reset_token();
        let expires_at = Utc::now() + self.reset_window;

        // Only the two reset fields change here; the record is not
        // re-validated as a whole.
        self.users
            .set_reset_token(&user.id, &digest, expires_at)
            .await?;

        let reset_url = format!(
            "{}/api/v1/users/resetPassword/{}",
            self.public_base_url, raw_token
        );
        let minutes = self.reset_window.num_minutes();
        let body = format!(
            "Hello {},\n\n\
            A password reset was requested for your account.\n\n\
            Submit a PATCH request with your new password to:\n\n\
            {}\n\n\
            This link is valid for {} minutes.\n\n\
            If you did not request a reset, please ignore this email; \
            your password has not been changed.",
            user.name, reset_url, minutes
        );

        if let Err(e) = self
            .mailer
            .send(&user.email, "Your password reset token", &body)
            .await
        {
            warn!(user_id = %user.id, error = %e, "Reset email delivery failed, rolling back token");
            if let Err(rollback) = self.users.clear_reset_token(&user.id).await {
                warn!(user_id = %user.id, error = %rollback, "Reset token rollback failed");
            }
            return Err(AuthError::DeliveryFailed.into());
        }

        info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    /// Complete a reset with the raw token from the emailed link.
    ///
    /// Wrong, consumed and expired tokens are deliberately
    /// indistinguishable to the caller. Success re-issues a session
    /// token (auto-login).
    pub async fn reset_password(
        &self,
        raw_token: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> DomainResult<String> {
        let digest = reset_token_digest(raw_token);
        let Some(user) = self.users.find_by_reset_digest(&digest).await? else {
            return Err(AuthError::InvalidOrExpiredToken.into());
        };

        let still_valid = user
            .reset_token_expires_at
            .map(|expires_at| Utc::now() < expires_at)
            .unwrap_or(false);
        if !still_valid {
            return Err(AuthError::InvalidOrExpiredToken.into());
        }

        validate_new_password(new_password, new_password_confirm)?;

        self.apply_new_password(&user.id, new_password).await
    }

    /// Change the password of an authenticated user. The caller has
    /// already been through the access-control middleware; the current
    /// password is still re-verified against the stored hash.
    pub async fn update_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> DomainResult<String> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Err(AuthError::AccountGone.into());
        };

        if !verify_password(current_password, &user.credential_hash) {
            return Err(AuthError::WrongCurrentPassword.into());
        }

        validate_new_password(new_password, new_password_confirm)?;

        self.apply_new_password(&user.id, new_password).await
    }

    /// Hash and persist a new credential, stamp the change time and
    /// issue a fresh session token. Clears any outstanding reset token
    /// as a side effect of the password update.
    async fn apply_new_password(&self, user_id: &str, new_password: &str) -> DomainResult<String> {
        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        self.users
            .update_password(user_id, &new_hash, credential_change_timestamp())
            .await?;

        let token = create_token(user_id, &self.jwt_config)?;

        info!(user_id, "Password changed");
        Ok(token)
    }
}
