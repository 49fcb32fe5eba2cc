//! Validation context - data passed to rules

use chrono::{DateTime, Utc};

/// Context provided to rules during validation
///
/// Carries the parts of the form snapshot that cross-field rules read, and
/// the instant age-based rules measure against.
#[derive(Clone, Debug)]
pub struct ValidationContext {
    /// Current password value (trimmed), compared by the confirmation rule
    pub password: String,

    /// Evaluation instant
    pub now: DateTime<Utc>,
}

impl ValidationContext {
    /// Create a context evaluated at `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            password: String::new(),
            now,
        }
    }

    /// Create a context evaluated at the current time
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Set the password the confirmation rule compares against
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::now()
    }
}
