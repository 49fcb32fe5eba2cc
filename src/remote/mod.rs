//! Remote side of the form: backend client, debouncing and username checks
//!
//! ```text
//!  username input (locally valid)
//!            │
//!            ▼
//!    ┌───────────────┐
//!    │   Debouncer   │   restart on every call
//!    │   (500ms)     │
//!    └───────┬───────┘
//!            ▼
//!    ┌───────────────┐      Completion::UsernameChecked
//!    │ Registration  │ ───────────────────────────────▶ controller
//!    │     API       │                                  (stale guard)
//!    └───────────────┘
//! ```

mod checker;
mod client;
mod debouncer;

pub use checker::{is_current, RemoteVerdict, UsernameChecker, DEFAULT_DEBOUNCE, USERNAME_TAKEN_MESSAGE};
pub use client::{
    interpret_availability, interpret_submission, ErrorDetail, HttpRegistrationApi, RefusalBody,
    RegistrationApi, SubmissionPayload, SubmitResponse, UNKNOWN_ERROR_MESSAGE,
};
pub use debouncer::Debouncer;
