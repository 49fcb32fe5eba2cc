//! Form controller - owns the form state and orchestrates submission
//!
//! The controller is the single owner of [`FormState`]. User input is applied
//! synchronously through `&mut self`; background work (debounced username
//! checks, the submission request) runs on tokio tasks that report back as
//! [`Completion`] messages, applied in arrival order by
//! [`FormController::handle_completion`].
//!
//! ```text
//!  input ──▶ registry ──▶ sync (views) ──▶ progress/gating
//!                │
//!                └──▶ username checker ──▶ Completion ──┐
//!  submit ──▶ validate all ──▶ request ──▶ Completion ──┤
//!                                                      ▼
//!                                            handle_completion
//! ```
//!
//! All methods that may start background work must run inside a tokio runtime.

pub mod submission;

pub use submission::{
    build_payload, FormMessage, Registered, SubmissionPhase, SubmitControl, Tone,
    CORRECT_ERRORS_MESSAGE, SERVER_ERROR_MESSAGE,
};

use crate::config::Config;
use crate::error::{ApiError, FormError};
use crate::events::Completion;
use crate::fields::{FieldId, FieldKind, FieldValue};
use crate::progress::{self, FormState};
use crate::remote::{
    is_current, RegistrationApi, RemoteVerdict, SubmitResponse, UsernameChecker,
    USERNAME_TAKEN_MESSAGE,
};
use crate::strength::{self, StrengthLevel};
use crate::sync::{self, FieldView};
use crate::validators::{ValidationContext, ValidationResult, ValidatorRegistry};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Outcome of a finished submission
pub type SubmissionReport = Result<Registered, FormError>;

/// Interactive registration form
pub struct FormController {
    registry: ValidatorRegistry,
    state: FormState,
    api: Arc<dyn RegistrationApi>,
    checker: UsernameChecker,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    submit_timeout: Duration,
    phase: SubmissionPhase,
    message: Option<FormMessage>,
    focus: Option<FieldId>,
    submit_control: SubmitControl,
    strength: StrengthLevel,
    /// Username the server reported as taken
    username_taken: Option<String>,
    /// Username whose verdict has not arrived yet
    awaiting_username: Option<String>,
}

impl FormController {
    /// Create a controller with default settings
    pub fn new(api: Arc<dyn RegistrationApi>) -> Result<Self, FormError> {
        Self::from_config(api, &Config::default())
    }

    /// Create a controller from configuration
    pub fn from_config(api: Arc<dyn RegistrationApi>, config: &Config) -> Result<Self, FormError> {
        config.validate().map_err(FormError::Config)?;
        let specs = config.field_specs().map_err(FormError::Config)?;
        let registry = ValidatorRegistry::new().map_err(FormError::Config)?;

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let checker = UsernameChecker::new(
            Arc::clone(&api),
            completions_tx.clone(),
            config.debounce(),
            config.check_timeout(),
            config.remote_check.enabled,
        );

        let mut controller = Self {
            registry,
            state: FormState::new(&specs),
            api,
            checker,
            completions_tx,
            completions_rx,
            submit_timeout: config.submit_timeout(),
            phase: SubmissionPhase::Idle,
            message: None,
            focus: None,
            submit_control: SubmitControl {
                enabled: false,
                busy: false,
            },
            strength: StrengthLevel::None,
            username_taken: None,
            awaiting_username: None,
        };
        controller.refresh();

        info!(
            fields = controller.state.fields().count(),
            remote_check = config.remote_check.enabled,
            "🔧 Form controller ready"
        );
        Ok(controller)
    }

    // ----------------------------------------------------------------------
    // Observable state
    // ----------------------------------------------------------------------

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn view(&self, field: FieldId) -> Option<&FieldView> {
        self.state.field(field).map(|f| &f.view)
    }

    pub fn value(&self, field: FieldId) -> Option<&FieldValue> {
        self.state.value(field)
    }

    pub fn progress_percent(&self) -> u8 {
        self.state.progress_percent
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.submit_enabled
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.submit_control
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn focus(&self) -> Option<FieldId> {
        self.focus
    }

    pub fn strength(&self) -> StrengthLevel {
        self.strength
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    // ----------------------------------------------------------------------
    // Input
    // ----------------------------------------------------------------------

    /// Apply one input event
    pub fn input(&mut self, field: FieldId, value: impl Into<FieldValue>) {
        let Some(state) = self.state.field_mut(field) else {
            warn!(field = field.as_str(), "Input for a field that is not part of this form");
            return;
        };
        state.set_value(value.into());

        let ctx = self.context();
        let result = self.evaluate_field(field, &ctx);

        match field {
            FieldId::Password => {
                let password = self.state.value(field).map(FieldValue::raw_text).unwrap_or("");
                self.strength = strength::score(password);
            }
            FieldId::Username => self.after_username_input(&result),
            _ => {}
        }

        self.refresh();
    }

    /// Keep the remote check in step with the username's local validity
    fn after_username_input(&mut self, result: &ValidationResult) {
        let current = self.state.text(FieldId::Username).to_string();

        if self
            .username_taken
            .as_deref()
            .is_some_and(|taken| !is_current(taken, &current))
        {
            self.username_taken = None;
        }

        if result.is_valid() {
            if self.checker.check_username(&current) {
                self.awaiting_username = Some(current);
            }
        } else {
            self.checker.cancel();
            self.awaiting_username = None;
        }
    }

    /// Request a password reset link for `email`
    ///
    /// Blank input is ignored.
    pub fn request_password_reset(&mut self, email: &str) -> Result<(), FormError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(());
        }

        let result = self
            .registry
            .validate(FieldId::Email, &FieldValue::from(email), &self.context());
        if !result.is_valid() {
            warn!("🚫 Password reset requested for invalid email");
            return Err(FormError::InvalidResetEmail(email.to_string()));
        }

        info!("📧 Password reset requested");
        self.message = Some(FormMessage::new(
            format!("A password reset link has been sent to {}.", email),
            Tone::Info,
        ));
        Ok(())
    }

    /// Clear every value, view, remote verdict and the strength meter
    ///
    /// The form-level message is left alone.
    pub fn reset(&mut self) {
        for field in self.state.fields_mut() {
            sync::reset(field);
        }
        self.checker.reset();
        self.username_taken = None;
        self.awaiting_username = None;
        self.strength = StrengthLevel::None;
        self.focus = None;
        self.refresh();
    }

    // ----------------------------------------------------------------------
    // Submission
    // ----------------------------------------------------------------------

    /// Validate the form and, if it passes, send it
    ///
    /// Returns once the request is in flight. The outcome arrives as a
    /// completion; see [`FormController::pump`] and
    /// [`FormController::submit_and_wait`].
    pub fn submit(&mut self) -> Result<(), FormError> {
        if self.phase == SubmissionPhase::Submitting {
            warn!("⚠️  Submit ignored: a submission is already in progress");
            return Err(FormError::SubmissionInProgress);
        }

        self.transition(SubmissionPhase::Validating);
        if let Some((field, message)) = self.validate_for_submit() {
            self.transition(SubmissionPhase::Rejected);
            info!(field = field.as_str(), "🚫 Submission blocked by invalid field");
            self.focus = Some(field);
            self.message = Some(FormMessage::new(CORRECT_ERRORS_MESSAGE, Tone::Error));
            self.transition(SubmissionPhase::Idle);
            return Err(FormError::LocalValidation { field, message });
        }

        self.transition(SubmissionPhase::Submitting);
        self.submit_control = SubmitControl {
            enabled: false,
            busy: true,
        };
        self.message = None;
        self.focus = None;

        let payload = build_payload(&self.state);
        let api = Arc::clone(&self.api);
        let completions = self.completions_tx.clone();
        let timeout = self.submit_timeout;
        info!(fields = payload.len(), "📨 Submitting registration");

        tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, api.submit_form(&payload)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ApiError::Timeout),
            };
            let _ = completions.send(Completion::SubmissionFinished(outcome));
        });

        Ok(())
    }

    /// Submit and drain completions until the submission settles
    pub async fn submit_and_wait(&mut self) -> SubmissionReport {
        self.submit()?;
        while let Some(completion) = self.completions_rx.recv().await {
            if let Some(report) = self.handle_completion(completion) {
                return report;
            }
        }
        Err(FormError::SubmissionFailure(SERVER_ERROR_MESSAGE.to_string()))
    }

    /// Evaluate every field that is required or holds text
    ///
    /// Every result is shown. Returns the first failure in form order.
    fn validate_for_submit(&mut self) -> Option<(FieldId, String)> {
        let candidates: Vec<FieldId> = self
            .state
            .fields()
            .filter(|f| f.spec.required || (f.spec.kind == FieldKind::Text && f.value.is_filled()))
            .map(|f| f.id())
            .collect();

        let ctx = self.context();
        let mut first_invalid = None;
        for field in candidates {
            if let Some(state) = self.state.field_mut(field) {
                state.touched = true;
            }
            if let ValidationResult::Invalid { message } = self.evaluate_field(field, &ctx) {
                first_invalid.get_or_insert((field, message));
            }
        }

        self.refresh();
        first_invalid
    }

    fn finish_submission(&mut self, outcome: Result<SubmitResponse, ApiError>) -> SubmissionReport {
        if self.phase != SubmissionPhase::Submitting {
            warn!(phase = %self.phase, "Submission result arrived outside of submitting phase");
        }

        let report = match outcome {
            Ok(SubmitResponse::Accepted { message, user }) => {
                self.transition(SubmissionPhase::Succeeded);
                info!("✅ Successfully registered user: {}", user);
                self.reset();
                self.message = Some(FormMessage::new(message.clone(), Tone::Success));
                Ok(Registered { message, user })
            }
            Ok(SubmitResponse::Refused { status, message }) => {
                self.transition(SubmissionPhase::Failed);
                warn!(status, "🚫 Registration refused: {}", message);
                self.message = Some(FormMessage::new(message.clone(), Tone::Error));
                Err(FormError::SubmissionRejected(message))
            }
            Err(e) => {
                self.transition(SubmissionPhase::Failed);
                error!("❌ Registration request failed: {}", e);
                self.message = Some(FormMessage::new(SERVER_ERROR_MESSAGE, Tone::Error));
                Err(FormError::SubmissionFailure(SERVER_ERROR_MESSAGE.to_string()))
            }
        };

        self.submit_control = SubmitControl {
            enabled: true,
            busy: false,
        };
        self.transition(SubmissionPhase::Idle);
        report
    }

    // ----------------------------------------------------------------------
    // Completions
    // ----------------------------------------------------------------------

    /// Wait for the next background completion
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Apply one completion; returns the report when it settles a submission
    pub fn handle_completion(&mut self, completion: Completion) -> Option<SubmissionReport> {
        match completion {
            Completion::UsernameChecked {
                issued_for,
                outcome,
            } => {
                self.apply_username_check(issued_for, outcome);
                None
            }
            Completion::SubmissionFinished(outcome) => Some(self.finish_submission(outcome)),
        }
    }

    /// Wait for and apply the next completion
    pub async fn pump(&mut self) -> Option<SubmissionReport> {
        let completion = self.next_completion().await?;
        self.handle_completion(completion)
    }

    /// Whether a username verdict for the current value is still due
    pub fn username_check_outstanding(&self) -> bool {
        self.awaiting_username.is_some()
    }

    /// Wait up to `limit` for the outstanding username verdict
    ///
    /// Returns `true` once no verdict is due. Meant for use before
    /// submitting; a submission report arriving here would be dropped.
    pub async fn settle_username_check(&mut self, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while self.awaiting_username.is_some() {
            let next = tokio::time::timeout_at(deadline, self.completions_rx.recv()).await;
            match next {
                Ok(Some(completion)) => {
                    if self.handle_completion(completion).is_some() {
                        warn!("Submission result arrived while settling username check");
                    }
                }
                _ => return false,
            }
        }
        true
    }

    /// Apply every completion that is already waiting, without blocking
    pub fn drain_ready(&mut self) -> Option<SubmissionReport> {
        let mut report = None;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if let Some(r) = self.handle_completion(completion) {
                report = Some(r);
            }
        }
        report
    }

    fn apply_username_check(&mut self, issued_for: String, outcome: Result<bool, ApiError>) {
        if self.awaiting_username.as_deref() == Some(issued_for.as_str()) {
            self.awaiting_username = None;
        }
        let current = self.state.text(FieldId::Username).to_string();

        match self.checker.verdict(&issued_for, outcome, &current) {
            RemoteVerdict::Taken => {
                info!(username = %issued_for, "🚫 Username is already taken");
                self.username_taken = Some(issued_for);
                if let Some(state) = self.state.field_mut(FieldId::Username) {
                    state.touched = true;
                }
                self.refresh();
            }
            RemoteVerdict::Available => {
                debug!(username = %issued_for, "Username is available");
            }
            RemoteVerdict::Stale => {
                debug!(
                    issued_for = %issued_for,
                    current = %current,
                    "Discarding stale username check"
                );
            }
            RemoteVerdict::Unavailable(e) => {
                warn!("⚠️  {}", FormError::RemoteCheckUnavailable(e));
            }
        }
    }

    // ----------------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------------

    fn context(&self) -> ValidationContext {
        self.state.context_at(Utc::now())
    }

    /// Validate one field and show the result; returns the local result
    fn evaluate_field(&mut self, field: FieldId, ctx: &ValidationContext) -> ValidationResult {
        let result = match self.state.value(field) {
            Some(value) => self.registry.validate(field, value, ctx),
            None => ValidationResult::Valid,
        };
        self.show(field, &result);
        result
    }

    /// Apply a local result to a field's view, honouring a "taken" verdict
    fn show(&mut self, field: FieldId, result: &ValidationResult) {
        let taken = field == FieldId::Username
            && result.is_valid()
            && self
                .username_taken
                .as_deref()
                .is_some_and(|taken| is_current(taken, self.state.text(FieldId::Username)));

        let shown = if taken {
            ValidationResult::invalid(USERNAME_TAKEN_MESSAGE)
        } else {
            result.clone()
        };

        if let Some(state) = self.state.field_mut(field) {
            sync::apply_result(state, &shown);
        }
    }

    /// Recompute progress and gating from the whole snapshot
    ///
    /// Touched fields get their fresh result re-applied so cross-field
    /// rules update on screen.
    fn refresh(&mut self) {
        let gate = progress::recompute(&self.state, &self.registry, &self.context());

        let touched: Vec<(FieldId, ValidationResult)> = gate
            .results
            .iter()
            .filter(|(field, _)| self.state.field(*field).is_some_and(|f| f.touched))
            .cloned()
            .collect();
        for (field, result) in &touched {
            self.show(*field, result);
        }

        self.state.apply_gate(&gate);
        if self.phase != SubmissionPhase::Submitting {
            self.submit_control.enabled = gate.submit_enabled;
        }
    }

    fn transition(&mut self, next: SubmissionPhase) {
        if !self.phase.can_transition_to(next) {
            warn!(from = %self.phase, to = %next, "Unexpected submission transition");
        }
        debug!(from = %self.phase, to = %next, "Submission phase");
        self.phase = next;
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("phase", &self.phase)
            .field("progress_percent", &self.state.progress_percent)
            .field("submit_enabled", &self.state.submit_enabled)
            .field("strength", &self.strength)
            .field("checker", &self.checker)
            .finish()
    }
}
