//! Field model for the registration form
//!
//! The set of fields is closed: every field the engine knows about is a
//! variant of [`FieldId`], and every rule dispatch matches on it exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a form field, declared in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Username,
    FullName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Website,
    Birthdate,
    Terms,
}

impl FieldId {
    /// All fields, in form order
    pub const ALL: [FieldId; 9] = [
        FieldId::Username,
        FieldId::FullName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Password,
        FieldId::ConfirmPassword,
        FieldId::Website,
        FieldId::Birthdate,
        FieldId::Terms,
    ];

    /// Wire name used in payloads and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Username => "username",
            FieldId::FullName => "fullName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Password => "password",
            FieldId::ConfirmPassword => "confirmPassword",
            FieldId::Website => "website",
            FieldId::Birthdate => "birthdate",
            FieldId::Terms => "terms",
        }
    }

    /// Input kind of this field
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::Terms => FieldKind::Checkbox,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// Input kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Checkbox,
}

/// Static description of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(id: FieldId, required: bool) -> Self {
        Self {
            id,
            required,
            kind: id.kind(),
        }
    }
}

/// The registration form: every field required except `website`
pub fn registration_form() -> Vec<FieldSpec> {
    registration_form_with_optional(&[FieldId::Website])
}

/// The registration form with an explicit set of optional fields
pub fn registration_form_with_optional(optional: &[FieldId]) -> Vec<FieldSpec> {
    FieldId::ALL
        .iter()
        .map(|id| FieldSpec::new(*id, !optional.contains(id)))
        .collect()
}

/// Current raw value of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Checked(bool),
    Text(String),
}

impl FieldValue {
    /// Empty value for a field kind
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Checkbox => FieldValue::Checked(false),
        }
    }

    /// Non-empty text or a checked box
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Checked(c) => *c,
        }
    }

    /// Text as entered (checkboxes have no text)
    pub fn raw_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Checked(_) => "",
        }
    }

    /// Trimmed text, the form every text rule sees
    pub fn trimmed(&self) -> &str {
        self.raw_text().trim()
    }

    /// Checked state; text counts as checked when non-empty
    pub fn is_checked(&self) -> bool {
        match self {
            FieldValue::Checked(c) => *c,
            FieldValue::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(c: bool) -> Self {
        FieldValue::Checked(c)
    }
}
