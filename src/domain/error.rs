//! Domain errors

use thiserror::Error;

/// Failures while verifying a session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token. Please log in again")]
    Malformed,

    #[error("Invalid token signature. Please log in again")]
    SignatureInvalid,

    #[error("Your token has expired. Please log in again")]
    Expired,
}

/// Authentication / authorization failures. Every variant carries a
/// user-facing message; storage and SMTP internals never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("You are not logged in. Please log in to get access")]
    NotAuthenticated,

    #[error("The user belonging to this token no longer exists")]
    AccountGone,

    #[error("Password was changed recently. Please log in again")]
    StalePassword,

    #[error("Your current password is wrong")]
    WrongCurrentPassword,

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("There is no user with that email address")]
    NoSuchAccount,

    #[error("Token is invalid or has expired")]
    InvalidOrExpiredToken,

    #[error("There was an error sending the email. Try again later")]
    DeliveryFailed,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
