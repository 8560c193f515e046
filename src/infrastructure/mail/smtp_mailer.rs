use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::{ContentDisposition, ContentType};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;
use crate::infrastructure::mail::traits::{Mailer, OutgoingEmail};

/// SMTP delivery over a TLS-wrapped connection.
///
/// The transport is built once at startup and shared across all in-flight
/// requests; lettre's async transport is safe for concurrent use and pools
/// its connections internally. Every send is bounded by the configured
/// timeout so a stalled SMTP session cannot hang a request forever.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .context("invalid SMTP relay host")?
            .port(config.smtp_port)
            .credentials(creds)
            .timeout(Some(Duration::from_secs(config.smtp_send_timeout_seconds)))
            .build();
        Ok(Self { transport })
    }

    fn build_message(email: &OutgoingEmail) -> anyhow::Result<Message> {
        let builder = Message::builder()
            .from(parse_mailbox(&email.from, "sender")?)
            .to(parse_mailbox(&email.to, "recipient")?)
            .reply_to(parse_mailbox(&email.reply_to, "reply-to")?)
            .subject(email.subject.clone());

        let message = match &email.attachment {
            Some(attachment) => {
                let content_type = resolve_content_type(
                    attachment.content_type.as_deref(),
                    &attachment.file_name,
                )?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(
                            SinglePart::builder()
                                .header(ContentType::TEXT_PLAIN)
                                .body(email.body.clone()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(content_type)
                                .header(ContentDisposition::attachment(&attachment.file_name))
                                .body(attachment.data.to_vec()),
                        ),
                )?
            }
            None => builder.body(email.body.clone())?,
        };
        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> anyhow::Result<()> {
        tracing::debug!(to = %email.to, subject = %email.subject, "dispatching email");
        let message = Self::build_message(&email)?;
        self.transport
            .send(message)
            .await
            .context("SMTP send failed")?;
        Ok(())
    }

    async fn verify(&self) -> anyhow::Result<()> {
        let reachable = self
            .transport
            .test_connection()
            .await
            .context("SMTP connection test failed")?;
        anyhow::ensure!(reachable, "SMTP server rejected the connection test");
        Ok(())
    }
}

fn parse_mailbox(address: &str, role: &str) -> anyhow::Result<Mailbox> {
    address
        .parse()
        .with_context(|| format!("invalid {} address: {}", role, address))
}

/// Use the declared content type when it parses; otherwise guess from the file
/// extension, with `application/octet-stream` as the last resort.
fn resolve_content_type(declared: Option<&str>, file_name: &str) -> anyhow::Result<ContentType> {
    if let Some(ct) = declared.and_then(|ct| ContentType::parse(ct).ok()) {
        return Ok(ct);
    }
    let guessed = mime_guess::from_path(file_name).first_or_octet_stream();
    ContentType::parse(guessed.essence_str()).context("unusable attachment content type")
}
