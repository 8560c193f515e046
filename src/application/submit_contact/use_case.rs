use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::domain::submission::{
    entity::{Submission, SubmissionForm},
    errors::SubmissionError,
};
use crate::infrastructure::mail::traits::{Mailer, OutgoingEmail};

/// Relays one validated form submission as an email to the configured recipient.
///
/// The whole flow is a single synchronous sequence per request: validate,
/// compose, dispatch. Validation failures produce no side effects; a failed
/// dispatch is reported immediately and never retried here.
pub struct SubmitContactUseCase {
    mailer: Arc<dyn Mailer>,
    sender: String,
    recipient: String,
}

impl SubmitContactUseCase {
    pub fn new(mailer: Arc<dyn Mailer>, sender: String, recipient: String) -> Self {
        Self {
            mailer,
            sender,
            recipient,
        }
    }

    #[instrument(skip(self, form), fields(has_attachment = form.attachment.is_some()))]
    pub async fn execute(&self, form: SubmissionForm) -> Result<(), SubmissionError> {
        let submission = Submission::from_form(form)?;

        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to: submission.email.clone(),
            subject: format!("Нова пропозиція від {}", submission.email),
            body: submission.body_text(),
            attachment: submission.attachment,
        };

        self.mailer.send(email).await.map_err(|err| {
            error!("mail dispatch failed: {:#}", err);
            SubmissionError::DeliveryFailed(err.to_string())
        })?;

        info!(reply_to = %submission.email, "submission relayed");
        Ok(())
    }
}
