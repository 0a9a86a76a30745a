//! Authentication API handlers
//!
//! Thin wrappers over the identity services: parse + validate the
//! body, delegate, convert the outcome to the response envelope.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest,
    UpdatePasswordRequest, UserData, UserDto,
};
use crate::application::identity::{AuthService, PasswordResetService, SignupData};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
    pub reset: Arc<PasswordResetService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, session token issued", body = ApiResponse<UserData>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserData>>), (StatusCode, Json<ApiResponse<UserData>>)> {
    let result = state
        .auth
        .signup(SignupData {
            name: request.name,
            email: request.email,
            password: request.password,
            password_confirm: request.password_confirm,
        })
        .await
        .map_err(domain_error_response)?;

    let body = ApiResponse::with_token(
        result.token,
        UserData {
            user: UserDto::from(result.user),
        },
    );
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = ApiResponse<EmptyData>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    let token = state
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::token(token)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/forgotPassword",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset token emailed", body = ApiResponse<EmptyData>),
        (status = 404, description = "No account with that email"),
        (status = 500, description = "Email delivery failed")
    )
)]
pub async fn forgot_password(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    state
        .reset
        .forgot_password(&request.email)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::ok()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/resetPassword/{token}",
    tag = "Authentication",
    params(("token" = String, Path, description = "Raw reset token from the emailed link")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset, fresh session token issued", body = ApiResponse<EmptyData>),
        (status = 400, description = "Token invalid or expired")
    )
)]
pub async fn reset_password(
    State(state): State<AuthHandlerState>,
    Path(token): Path<String>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    let session = state
        .reset
        .reset_password(&token, &request.password, &request.password_confirm)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::token(session)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/updateMyPassword",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed, fresh session token issued", body = ApiResponse<EmptyData>),
        (status = 401, description = "Not authenticated or wrong current password")
    )
)]
pub async fn update_password(
    State(state): State<AuthHandlerState>,
    Extension(current): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    let session = state
        .reset
        .update_password(
            &current.0.id,
            &request.password_current,
            &request.password,
            &request.password_confirm,
        )
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::token(session)))
}
