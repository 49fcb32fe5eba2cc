//! Submission lifecycle types

use crate::fields::FieldValue;
use crate::progress::FormState;
use crate::remote::SubmissionPayload;
use serde::Serialize;

/// Form-level message shown when validation fails at submit time
pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the errors in the form.";

/// Form-level message for transport, parse and timeout failures
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";

/// Value a checked checkbox submits
pub const CHECKBOX_ON: &str = "on";

/// Submission state machine
///
/// `Idle -> Validating -> (Rejected | Submitting) -> (Succeeded | Failed) -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    /// Whether `self -> next` is an edge of the state machine
    pub fn can_transition_to(self, next: SubmissionPhase) -> bool {
        use SubmissionPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Rejected)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Rejected, Idle)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Rejected => "rejected",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Succeeded => "succeeded",
            SubmissionPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Style of the form-level message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
    Info,
}

/// Form-level message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    pub text: String,
    pub tone: Tone,
}

impl FormMessage {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// State of the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    pub enabled: bool,
    /// Busy indicator while a request is pending
    pub busy: bool,
}

impl SubmitControl {
    pub fn label(&self) -> &'static str {
        if self.busy {
            "Registering..."
        } else {
            "Register"
        }
    }
}

/// A successful registration
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    pub message: String,
    pub user: serde_json::Value,
}

/// Serialize every field into the submission payload
///
/// Text fields are sent as entered. A checked checkbox is sent as `"on"`,
/// an unchecked one is left out.
pub fn build_payload(state: &FormState) -> SubmissionPayload {
    state
        .fields()
        .filter_map(|field| {
            let value = match &field.value {
                FieldValue::Text(text) => text.clone(),
                FieldValue::Checked(true) => CHECKBOX_ON.to_string(),
                FieldValue::Checked(false) => return None,
            };
            Some((field.id().as_str().to_string(), value))
        })
        .collect()
}
