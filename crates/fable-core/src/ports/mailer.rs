//! Mail collaborator port.

use async_trait::async_trait;
use thiserror::Error;

/// A composed message handed to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}

/// External mail sender. Delivery is single-shot; retries are the
/// collaborator's business, not ours.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}
