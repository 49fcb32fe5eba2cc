//! Field state synchronization
//!
//! Applies validation results to a field's observable state: the validity
//! marker, the accessibility-invalid flag and the field's error slot.

use crate::fields::{FieldId, FieldSpec, FieldValue};
use crate::validators::ValidationResult;
use serde::Serialize;
use tracing::trace;

/// Visual validity marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Never evaluated, or reset
    Neutral,
    Valid,
    Invalid,
}

/// What a renderer draws for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub marker: Marker,
    /// Value of `aria-invalid`
    pub aria_invalid: bool,
    /// Text of the field's dedicated error slot
    pub error_text: String,
}

impl Default for FieldView {
    fn default() -> Self {
        Self {
            marker: Marker::Neutral,
            aria_invalid: false,
            error_text: String::new(),
        }
    }
}

/// Live state of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub spec: FieldSpec,
    pub value: FieldValue,
    /// Last applied result, `None` until first evaluated
    pub validity: Option<ValidationResult>,
    /// Edited by the user or evaluated at submit time
    pub touched: bool,
    pub view: FieldView,
}

impl FieldState {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            value: FieldValue::empty(spec.kind),
            validity: None,
            touched: false,
            view: FieldView::default(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.spec.id
    }

    /// Record user input
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.touched = true;
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.validity, Some(ValidationResult::Valid))
    }
}

/// Apply a validation result to a field's observable state
pub fn apply_result(state: &mut FieldState, result: &ValidationResult) {
    match result {
        ValidationResult::Valid => {
            state.view.marker = Marker::Valid;
            state.view.aria_invalid = false;
            state.view.error_text.clear();
        }
        ValidationResult::Invalid { message } => {
            state.view.marker = Marker::Invalid;
            state.view.aria_invalid = true;
            state.view.error_text.clone_from(message);
        }
    }

    trace!(field = state.id().as_str(), marker = ?state.view.marker, "Applied field result");
    state.validity = Some(result.clone());
}

/// Clear a field's value and every visual trace of validation
pub fn reset(state: &mut FieldState) {
    state.value = FieldValue::empty(state.spec.kind);
    state.validity = None;
    state.touched = false;
    state.view = FieldView::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username() -> FieldState {
        FieldState::new(FieldSpec::new(FieldId::Username, true))
    }

    #[test]
    fn test_invalid_then_valid() {
        let mut state = username();
        apply_result(&mut state, &ValidationResult::invalid("too short"));
        assert_eq!(state.view.marker, Marker::Invalid);
        assert!(state.view.aria_invalid);
        assert_eq!(state.view.error_text, "too short");
        assert!(!state.is_valid());

        apply_result(&mut state, &ValidationResult::Valid);
        assert_eq!(state.view.marker, Marker::Valid);
        assert!(!state.view.aria_invalid);
        assert!(state.view.error_text.is_empty());
        assert!(state.is_valid());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = username();
        state.set_value(FieldValue::from("ada"));
        apply_result(&mut state, &ValidationResult::invalid("taken"));

        reset(&mut state);
        assert_eq!(state, username());
    }
}
