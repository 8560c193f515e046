use thiserror::Error;

/// Failure modes of one submission. The HTTP boundary maps each variant to a
/// status code and a caller-facing message; the payload here is for logs only.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("attachment too large: {size} bytes")]
    PayloadTooLarge { size: usize },
    #[error("mail delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}
