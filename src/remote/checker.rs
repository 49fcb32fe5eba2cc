//! Debounced username uniqueness checks
//!
//! Local syntactic validity is a precondition for asking the server, never
//! a substitute for it. Results only apply while the field still holds the
//! value they were issued for.

use super::{Debouncer, RegistrationApi};
use crate::error::ApiError;
use crate::events::Completion;
use crate::fields::FieldId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Message shown when the server reports the username as taken
pub const USERNAME_TAKEN_MESSAGE: &str = "Username is already taken";

/// Debounce delay between the last keystroke and the query
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What a finished check means for the field right now
#[derive(Debug)]
pub enum RemoteVerdict {
    /// Server reports the current value as taken
    Taken,
    /// Server reports the current value as free
    Available,
    /// Field changed since the query was issued; result discarded
    Stale,
    /// Query failed; the field stays governed by local rules
    Unavailable(ApiError),
}

/// Whether a result issued for `issued_for` still applies to `current`
pub fn is_current(issued_for: &str, current: &str) -> bool {
    issued_for == current
}

/// Schedules debounced uniqueness queries and judges their results
pub struct UsernameChecker {
    api: Arc<dyn RegistrationApi>,
    debouncer: Debouncer<FieldId>,
    completions: UnboundedSender<Completion>,
    timeout: Duration,
    enabled: bool,
    /// Value of the most recently scheduled query
    last_scheduled: Option<String>,
}

impl UsernameChecker {
    pub fn new(
        api: Arc<dyn RegistrationApi>,
        completions: UnboundedSender<Completion>,
        debounce: Duration,
        timeout: Duration,
        enabled: bool,
    ) -> Self {
        Self {
            api,
            debouncer: Debouncer::new(debounce),
            completions,
            timeout,
            enabled,
            last_scheduled: None,
        }
    }

    /// Schedule a query for a locally valid username
    ///
    /// Restarts the debounce timer. A value that is already scheduled or
    /// answered is not asked again. Returns whether a new query was scheduled.
    pub fn check_username(&mut self, value: &str) -> bool {
        if !self.enabled || self.last_scheduled.as_deref() == Some(value) {
            return false;
        }

        let api = Arc::clone(&self.api);
        let completions = self.completions.clone();
        let timeout = self.timeout;
        let issued_for = value.to_string();
        self.last_scheduled = Some(issued_for.clone());

        self.debouncer.schedule(FieldId::Username, move || async move {
            debug!(username = %issued_for, "Checking username availability");
            let outcome = match tokio::time::timeout(timeout, api.check_username(&issued_for)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ApiError::Timeout),
            };
            // The controller may be gone; nothing left to update then
            let _ = completions.send(Completion::UsernameChecked { issued_for, outcome });
        });
        true
    }

    /// Drop the waiting query, if any (the field became locally invalid)
    pub fn cancel(&mut self) {
        self.debouncer.cancel(&FieldId::Username);
        self.last_scheduled = None;
    }

    /// Forget everything (form reset)
    pub fn reset(&mut self) {
        self.debouncer.cancel_all();
        self.last_scheduled = None;
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending(&FieldId::Username)
    }

    /// Judge a finished query against the field's current value
    pub fn verdict(
        &self,
        issued_for: &str,
        outcome: Result<bool, ApiError>,
        current: &str,
    ) -> RemoteVerdict {
        if !is_current(issued_for, current) {
            return RemoteVerdict::Stale;
        }
        match outcome {
            Ok(true) => RemoteVerdict::Available,
            Ok(false) => RemoteVerdict::Taken,
            Err(e) => RemoteVerdict::Unavailable(e),
        }
    }
}

impl std::fmt::Debug for UsernameChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernameChecker")
            .field("enabled", &self.enabled)
            .field("delay", &self.debouncer.delay())
            .field("timeout", &self.timeout)
            .field("last_scheduled", &self.last_scheduled)
            .finish()
    }
}
