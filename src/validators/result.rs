//! Validation result types

use serde::{Deserialize, Serialize};

/// Result of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Value satisfies its rule
    Valid,

    /// Value fails its rule
    Invalid {
        /// Message shown in the field's error slot
        message: String,
    },
}

impl ValidationResult {
    /// Build an invalid result
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationResult::Invalid {
            message: message.into(),
        }
    }

    /// Valid when `ok`, otherwise invalid with `message`
    pub fn check(ok: bool, message: &str) -> Self {
        if ok {
            ValidationResult::Valid
        } else {
            ValidationResult::invalid(message)
        }
    }

    /// Check if result is Valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Failure message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { message } => Some(message),
        }
    }
}
