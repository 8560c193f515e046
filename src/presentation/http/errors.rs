//! HTTP error handling and response conversion.
//!
//! Every failure a handler can produce is mapped here to an HTTP status code and the
//! uniform JSON envelope `{ "ok": false, "error": "<message>" }`. The caller-facing
//! message is fixed per variant; internal detail is logged server-side only.

use crate::domain::submission::errors::SubmissionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
///
/// Each variant maps to a specific HTTP status code and a fixed caller-facing
/// message; transport and parsing detail stays in the logs.
#[derive(Debug)]
pub enum AppError {
    /// `email` or `phone` empty or absent (400).
    MissingRequiredField,

    /// Attachment above the size cap (413).
    PayloadTooLarge,

    /// Mail transport failed to deliver (500).
    Delivery(String),

    /// Unclassified internal error, including malformed multipart streams (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField => write!(f, "Missing required field"),
            Self::PayloadTooLarge => write!(f, "Payload too large"),
            Self::Delivery(msg) => write!(f, "Delivery error: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingRequiredField => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Delivery(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The caller-facing message, without implementation detail.
    fn user_message(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "Будь ласка, заповніть Email та Телефон.",
            Self::PayloadTooLarge => "Файл перевищує 10 МБ.",
            Self::Delivery(_) | Self::Internal(_) => "Не вдалося надіслати e-mail.",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        // Log the error with full context
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("error={}", self);
            }
            StatusCode::BAD_REQUEST | StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "ok": false, "error": message }))).into_response()
    }
}

// === Domain Error Conversion ===

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::MissingRequiredField(_) => AppError::MissingRequiredField,
            SubmissionError::PayloadTooLarge { .. } => AppError::PayloadTooLarge,
            SubmissionError::DeliveryFailed(msg) => AppError::Delivery(msg),
            SubmissionError::Unexpected(msg) => AppError::Internal(msg),
        }
    }
}
