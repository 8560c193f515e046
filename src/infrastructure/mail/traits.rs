use async_trait::async_trait;

use crate::domain::submission::entity::Attachment;

/// A fully composed message, ready for the transport.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

/// Delivery seam. The production implementation speaks SMTP; tests substitute
/// recording or failing fakes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message. Errors carry transport detail for the logs; the
    /// caller-facing response never includes it.
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()>;

    /// Probe transport connectivity without sending anything.
    async fn verify(&self) -> anyhow::Result<()>;
}
