//! HTTP REST API interfaces
//!
//! - `middleware`: bearer-token gate and role restriction
//! - `modules`: request handlers grouped by feature
//! - `common`: response envelope and validated JSON extraction
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
