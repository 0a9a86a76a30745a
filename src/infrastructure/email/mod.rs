//! Outbound email
//!
//! Delivery is a collaborator, not a concern of the auth flows: the
//! services depend on [`EmailSender`] and never on a transport.

pub mod smtp;

use async_trait::async_trait;
use thiserror::Error;

pub use smtp::SmtpMailer;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Capability to deliver a plain-text email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}
