//! Core rule traits and interfaces
//!
//! This module defines the fundamental abstraction every field rule implements.

use crate::fields::FieldValue;
use serde::{Deserialize, Serialize};

/// The core rule trait that all field rules must implement.
///
/// Rules are pure: the same input and context always produce the same result.
pub trait FieldRule: Send + Sync {
    /// Check a prepared field value
    ///
    /// # Arguments
    /// * `input` - Trimmed text or checked state of the field
    /// * `ctx` - The rest of the form snapshot and the evaluation instant
    fn check(&self, input: RuleInput<'_>, ctx: &super::ValidationContext) -> super::ValidationResult;

    /// Get rule name (for logging and debugging)
    fn name(&self) -> &str;

    /// Which input form this rule evaluates
    fn input_kind(&self) -> InputKind {
        InputKind::Text
    }
}

/// Value as seen by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleInput<'a> {
    /// Trimmed text value
    Text(&'a str),
    /// Checkbox state
    Checked(bool),
}

impl<'a> RuleInput<'a> {
    /// Prepare a raw value for a rule of the given input kind
    pub fn prepare(value: &'a FieldValue, kind: InputKind) -> Self {
        match kind {
            InputKind::Text => RuleInput::Text(value.trimmed()),
            InputKind::Checked => RuleInput::Checked(value.is_checked()),
        }
    }

    /// Text view of the input (checkboxes are empty)
    pub fn text(&self) -> &'a str {
        match self {
            RuleInput::Text(s) => s,
            RuleInput::Checked(_) => "",
        }
    }
}

/// Input form a rule expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Checked,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Text => write!(f, "text"),
            InputKind::Checked => write!(f, "checked"),
        }
    }
}
