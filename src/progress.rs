//! Progress and submit gating
//!
//! `FormState` is the single snapshot of every field. Its aggregate values
//! (`progress_percent`, `submit_enabled`) are recomputed from the whole
//! snapshot on every change and never patched incrementally.

use crate::fields::{FieldId, FieldSpec, FieldValue};
use crate::sync::FieldState;
use crate::validators::{ValidationContext, ValidationResult, ValidatorRegistry};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Snapshot of the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: BTreeMap<FieldId, FieldState>,
    pub progress_percent: u8,
    pub submit_enabled: bool,
}

impl FormState {
    /// Create an empty form with aggregates already computed
    pub fn new(specs: &[FieldSpec]) -> Self {
        let fields = specs
            .iter()
            .map(|spec| (spec.id, FieldState::new(*spec)))
            .collect();

        let mut state = Self {
            fields,
            progress_percent: 0,
            submit_enabled: false,
        };
        state.progress_percent = progress_percent(&state);
        state
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldState> {
        self.fields.get(&id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FieldState> {
        self.fields.get_mut(&id)
    }

    /// Fields in form order
    pub fn fields(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.values()
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FieldState> {
        self.fields.values_mut()
    }

    pub fn value(&self, id: FieldId) -> Option<&FieldValue> {
        self.fields.get(&id).map(|f| &f.value)
    }

    /// Trimmed text of a field, empty when absent
    pub fn text(&self, id: FieldId) -> &str {
        self.value(id).map(FieldValue::trimmed).unwrap_or("")
    }

    /// Validation context for this snapshot at `now`
    pub fn context_at(&self, now: DateTime<Utc>) -> ValidationContext {
        ValidationContext::at(now).with_password(self.text(FieldId::Password))
    }

    /// Store freshly computed aggregates
    pub fn apply_gate(&mut self, gate: &Gate) {
        self.progress_percent = gate.progress_percent;
        self.submit_enabled = gate.submit_enabled;
    }
}

/// Aggregates recomputed from a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub progress_percent: u8,
    pub submit_enabled: bool,
    /// Fresh result for every field, in form order
    pub results: Vec<(FieldId, ValidationResult)>,
}

/// Share of required fields that are filled, rounded half up
///
/// A form with no required fields counts as complete.
pub fn progress_percent(state: &FormState) -> u8 {
    let (filled, required) = state
        .fields()
        .filter(|f| f.spec.required)
        .fold((0u32, 0u32), |(filled, total), f| {
            (filled + u32::from(f.value.is_filled()), total + 1)
        });

    if required == 0 {
        return 100;
    }

    ((200 * filled + required) / (2 * required)) as u8
}

/// Re-evaluate every field and derive progress and submit gating
pub fn recompute(state: &FormState, registry: &ValidatorRegistry, ctx: &ValidationContext) -> Gate {
    let results: Vec<(FieldId, ValidationResult)> = state
        .fields()
        .map(|f| (f.id(), registry.validate(f.id(), &f.value, ctx)))
        .collect();

    let submit_enabled = state
        .fields()
        .zip(results.iter())
        .filter(|(f, _)| f.spec.required)
        .all(|(_, (_, result))| result.is_valid());

    let gate = Gate {
        progress_percent: progress_percent(state),
        submit_enabled,
        results,
    };

    debug!(
        progress = gate.progress_percent,
        submit_enabled = gate.submit_enabled,
        "Recomputed form gate"
    );
    gate
}
