//! User aggregate
//!
//! Contains the User entity and the repository interface.

pub mod model;
pub mod repository;

pub use model::{credential_change_timestamp, role_to_str, str_to_role, NewUser, User, UserRole};
pub use repository::UserRepositoryInterface;
