//! Error types
//!
//! Nothing here is fatal: every variant describes a condition the form
//! recovers from by returning to its idle state.

use crate::fields::FieldId;
use thiserror::Error;

/// Failures talking to the registration backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Request timed out")]
    Timeout,
}

/// Form-level error taxonomy
#[derive(Debug, Error)]
pub enum FormError {
    /// A field failed its synchronous rule; shown inline
    #[error("{field}: {message}")]
    LocalValidation { field: FieldId, message: String },

    /// Username uniqueness query failed; the field keeps its local state
    #[error("Username check unavailable: {0}")]
    RemoteCheckUnavailable(#[source] ApiError),

    /// The server refused the submission with a structured message
    #[error("Submission rejected: {0}")]
    SubmissionRejected(String),

    /// Transport, parse or timeout failure during submission
    #[error("Submission failed: {0}")]
    SubmissionFailure(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Invalid email for password reset: {0}")]
    InvalidResetEmail(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl FormError {
    /// Text suitable for the form-level message area
    pub fn display_message(&self) -> String {
        match self {
            FormError::LocalValidation { message, .. } => message.clone(),
            FormError::SubmissionRejected(message) | FormError::SubmissionFailure(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}
