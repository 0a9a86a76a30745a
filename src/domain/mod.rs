//! Core business entities, errors and persistence traits

pub mod error;
pub mod user;

pub use error::{AuthError, DomainError, DomainResult, TokenError};
pub use user::{
    credential_change_timestamp, role_to_str, str_to_role, NewUser, User, UserRepositoryInterface,
    UserRole,
};
