//! Mail collaborator adapters.
//!
//! Real transport lives outside this system; `LogMailer` hands composed
//! messages to the log stream, `RecordingMailer` captures them for tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use fable_core::ports::{MailError, MailMessage, Mailer};

/// Mailer that emits each message as a structured log event.
#[derive(Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            subject = %message.subject,
            from = %message.from,
            to = ?message.to,
            body_len = message.body.len(),
            "mail handed to delivery"
        );
        Ok(())
    }
}

/// Test double that records every message and can be primed to fail.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `send` fail with the given reason.
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.fail_with.lock().await = Some(reason.into());
    }

    pub async fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if let Some(reason) = self.fail_with.lock().await.clone() {
            return Err(MailError::Delivery(reason));
        }
        self.sent.lock().await.push(message);
        Ok(())
    }
}
