use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Account role. Privileged roles are never assignable through signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    User,
    Guide,
    LeadGuide,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

/// User account model.
///
/// Deliberately not `Serialize`: everything that crosses the API
/// boundary goes through a DTO, so `credential_hash` and the reset
/// fields cannot leak into a response by accident.
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo: String,
    pub role: UserRole,
    pub credential_hash: String,
    pub credential_changed_at: Option<DateTime<Utc>>,
    pub reset_token_digest: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether the password was changed after the given token
    /// issued-at timestamp (Unix seconds). Tokens issued before the
    /// last credential change are stale and must be rejected.
    ///
    /// The 1-second skew slack is applied where `credential_changed_at`
    /// is written (see [`credential_change_timestamp`]), so the
    /// comparison here is exact.
    pub fn changed_password_after(&self, token_issued_at: i64) -> bool {
        match self.credential_changed_at {
            Some(changed_at) => token_issued_at < changed_at.timestamp(),
            None => false,
        }
    }
}

/// Data required to create an account. The caller (the authentication
/// service) has already validated and hashed everything in here.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub photo: String,
    pub role: UserRole,
    pub credential_hash: String,
}

/// Timestamp to persist as `credential_changed_at` after a password
/// mutation: one second in the past, so a session token issued in the
/// same instant as the change still verifies as issued-after.
pub fn credential_change_timestamp() -> DateTime<Utc> {
    Utc::now() - Duration::seconds(1)
}

pub fn role_to_str(role: UserRole) -> &'static str {
    match role {
        UserRole::User => "user",
        UserRole::Guide => "guide",
        UserRole::LeadGuide => "lead-guide",
        UserRole::Admin => "admin",
    }
}

pub fn str_to_role(s: &str) -> UserRole {
    match s.to_lowercase().as_str() {
        "admin" => UserRole::Admin,
        "lead-guide" => UserRole::LeadGuide,
        "guide" => UserRole::Guide,
        _ => UserRole::User,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_change(changed_at: Option<DateTime<Utc>>) -> User {
        User {
            id: "u-1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            photo: "default.jpg".to_string(),
            role: UserRole::User,
            credential_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            credential_changed_at: changed_at,
            reset_token_digest: None,
            reset_token_expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn never_changed_password_is_never_stale() {
        let user = user_with_change(None);
        assert!(!user.changed_password_after(0));
        assert!(!user.changed_password_after(Utc::now().timestamp()));
    }

    #[test]
    fn token_issued_before_change_is_stale() {
        let changed = Utc::now();
        let user = user_with_change(Some(changed));
        assert!(user.changed_password_after(changed.timestamp() - 60));
        assert!(!user.changed_password_after(changed.timestamp() + 60));
    }

    #[test]
    fn change_timestamp_carries_skew_slack() {
        let before = Utc::now();
        let stamped = credential_change_timestamp();
        assert!(stamped < before);
        assert!(before - stamped < Duration::seconds(2));
    }

    #[test]
    fn role_round_trip() {
        for role in [
            UserRole::User,
            UserRole::Guide,
            UserRole::LeadGuide,
            UserRole::Admin,
        ] {
            assert_eq!(str_to_role(role_to_str(role)), role);
        }
        assert_eq!(str_to_role("something-else"), UserRole::User);
    }
}
