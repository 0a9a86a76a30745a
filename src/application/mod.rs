//! Business logic and use cases

pub mod identity;

pub use identity::{AuthResult, AuthService, PasswordResetService, SignupData};
