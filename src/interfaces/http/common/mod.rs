//! Shared HTTP plumbing: response envelope, error mapping, validated
//! JSON extraction.

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{AuthError, DomainError};

pub use validated_json::ValidatedJson;

/// Standard response envelope.
///
/// Success: `{"status": "success", "token"?, "data"?}`.
/// Failure: `{"status": "fail" | "error", "message"}` — `fail` for
/// client errors, `error` for server-side ones.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            token: None,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_token(token: impl Into<String>, data: T) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::success(data)
        }
    }

    /// Success without a payload (e.g. forgotPassword acknowledgement)
    pub fn ok() -> Self {
        Self {
            status: "success".to_string(),
            token: None,
            data: None,
            message: None,
        }
    }

    /// Success carrying only a fresh session token
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            token: Some(token.into()),
            data: None,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            token: None,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            token: None,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Empty response payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// HTTP status for a domain error, per the error taxonomy.
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials
            | AuthError::NotAuthenticated
            | AuthError::AccountGone
            | AuthError::StalePassword
            | AuthError::WrongCurrentPassword => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::NoSuchAccount => StatusCode::NOT_FOUND,
            AuthError::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,
            AuthError::DeliveryFailed => StatusCode::INTERNAL_SERVER_ERROR,
        },
        DomainError::Storage(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the response envelope.
///
/// Operational errors keep their message; infrastructure errors are
/// logged and replaced with a generic one so internals never leak.
pub fn domain_error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = error_status(&err);

    let body = match &err {
        DomainError::Storage(_) | DomainError::Internal(_) => {
            error!(error = %err, "Internal error while handling request");
            ApiResponse::error("Something went very wrong")
        }
        _ if status.is_server_error() => ApiResponse::error(err.to_string()),
        _ => ApiResponse::fail(err.to_string()),
    };

    (status, Json(body))
}
