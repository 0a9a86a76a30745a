//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{role_to_str, User};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "a user must have a name"))]
    pub name: String,
    #[validate(email(message = "please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords are not the same"))]
    pub password_confirm: String,
}

/// Login payload. Fields default to empty so a missing email and a
/// wrong password take the same non-enumerating 401 path in the
/// service instead of failing differently at the parse stage.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "please provide a valid email"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords are not the same"))]
    pub password_confirm: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "current password is required"))]
    pub password_current: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords are not the same"))]
    pub password_confirm: String,
}

/// Public projection of an account. Credential and reset-token fields
/// are not part of this type, so they cannot appear in a response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo: String,
    pub role: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            photo: user.photo,
            role: role_to_str(user.role).to_string(),
        }
    }
}

/// `data` payload of the signup response
#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub user: UserDto,
}
