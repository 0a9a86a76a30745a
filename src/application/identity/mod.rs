//! Identity use-cases: signup, login, password reset

pub mod password_reset;
pub mod service;

pub use password_reset::PasswordResetService;
pub use service::{AuthResult, AuthService, SignupData};
