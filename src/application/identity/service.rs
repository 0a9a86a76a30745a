//! Authentication service — signup and login
//!
//! All credential-related business logic lives here. HTTP handlers are
//! thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    AuthError, DomainError, DomainResult, NewUser, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Result of a successful signup: the created account plus its
/// first session token.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub token: String,
}

/// Signup input, already parsed from the request body.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepositoryInterface>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }

    /// Create a new account and issue its first session token.
    ///
    /// The role is always `user`; privileged roles are assigned only
    /// through the admin path, never from request input.
    pub async fn signup(&self, data: SignupData) -> DomainResult<AuthResult> {
        if data.name.trim().is_empty() {
            return Err(DomainError::Validation("A user must have a name".into()));
        }

        let email = normalize_email(&data.email);
        if !is_plausible_email(&email) {
            return Err(DomainError::Validation(
                "Please provide a valid email".into(),
            ));
        }

        validate_new_password(&data.password, &data.password_confirm)?;

        let credential_hash = hash_password(&data.password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = self
            .users
            .create_user(NewUser {
                name: data.name.trim().to_string(),
                email,
                photo: "default.jpg".to_string(),
                role: UserRole::User,
                credential_hash,
            })
            .await?;

        let token = create_token(&user.id, &self.jwt_config)?;

        info!(user_id = %user.id, "New user signed up");
        Ok(AuthResult { user, token })
    }

    /// Authenticate by email + password and return a session token.
    ///
    /// Unknown email and wrong password yield the same error, so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<String> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.credential_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = create_token(&user.id, &self.jwt_config)?;
        Ok(token)
    }
}

// ── Helpers ─────────────────────────────────────────────────────

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, host)) => !local.is_empty() && host.contains('.') && !host.starts_with('.'),
        None => false,
    }
}

pub(crate) fn validate_new_password(password: &str, confirm: &str) -> DomainResult<()> {
    if password.len() < 8 {
        return Err(DomainError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if password != confirm {
        return Err(DomainError::Validation("Passwords are not the same".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::storage::InMemoryUserRepository;

    fn service() -> AuthService {
        let jwt = JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiration_days: 90,
            issuer: "tours-service".to_string(),
        };
        AuthService::new(Arc::new(InMemoryUserRepository::new()), jwt)
    }

    fn signup_data(email: &str) -> SignupData {
        SignupData {
            name: "Ann".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_creates_user_account_with_token() {
        let svc = service();
        let result = svc.signup(signup_data("Ann@X.com")).await.unwrap();

        assert_eq!(result.user.email, "ann@x.com");
        assert_eq!(result.user.role, UserRole::User);
        assert_eq!(result.user.photo, "default.jpg");

        let claims = verify_token(&result.token, &svc.jwt_config).unwrap();
        assert_eq!(claims.sub, result.user.id);
    }

    #[tokio::test]
    async fn signup_rejects_password_mismatch() {
        let svc = service();
        let mut data = signup_data("ann@x.com");
        data.password_confirm = "different1".to_string();

        assert!(matches!(
            svc.signup(data).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn signup_rejects_short_password() {
        let svc = service();
        let mut data = signup_data("ann@x.com");
        data.password = "short".to_string();
        data.password_confirm = "short".to_string();

        assert!(matches!(
            svc.signup(data).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn signup_rejects_invalid_email() {
        let svc = service();
        for email in ["", "no-at-sign", "a@nodot"] {
            assert!(
                matches!(
                    svc.signup(signup_data(email)).await,
                    Err(DomainError::Validation(_))
                ),
                "expected validation error for {:?}",
                email
            );
        }
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let svc = service();
        svc.signup(signup_data("ann@x.com")).await.unwrap();

        assert!(matches!(
            svc.signup(signup_data("ann@x.com")).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_credentials() {
        let svc = service();
        svc.signup(signup_data("ann@x.com")).await.unwrap();

        let token = svc.login("ann@x.com", "secret123").await.unwrap();
        assert!(verify_token(&token, &svc.jwt_config).is_ok());
    }

    #[tokio::test]
    async fn login_does_not_leak_account_existence() {
        let svc = service();
        svc.signup(signup_data("ann@x.com")).await.unwrap();

        let wrong_password = svc.login("ann@x.com", "wrong-password").await;
        let unknown_email = svc.login("nobody@x.com", "secret123").await;

        for result in [wrong_password, unknown_email] {
            assert!(matches!(
                result,
                Err(DomainError::Auth(AuthError::InvalidCredentials))
            ));
        }
    }

    #[tokio::test]
    async fn login_with_missing_email_is_invalid_credentials() {
        let svc = service();
        assert!(matches!(
            svc.login("", "secret123").await,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }
}
