//! # Trailhead Tours API — authentication core
//!
//! Authentication and authorization subsystem of the Trailhead Tours
//! REST API: signup, login, session-token gating, role-based access
//! control and the self-service password-reset flow.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, errors and persistence traits
//! - **application**: Use-case services (identity, password reset)
//! - **infrastructure**: External concerns (crypto, SMTP email, storage)
//! - **interfaces**: HTTP REST API with Swagger documentation
//! - **support**: Graceful shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
