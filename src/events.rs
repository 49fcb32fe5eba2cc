//! Completion messages from background work
//!
//! Async tasks never touch form state. They report back through a channel
//! and the controller applies each message in arrival order.

use crate::error::ApiError;
use crate::remote::SubmitResponse;

/// Result of a piece of background work
#[derive(Debug)]
pub enum Completion {
    /// A username uniqueness query finished
    UsernameChecked {
        /// Value the query was issued for
        issued_for: String,
        /// `Ok(available)` or the failure
        outcome: Result<bool, ApiError>,
    },

    /// The form submission request finished
    SubmissionFinished(Result<SubmitResponse, ApiError>),
}
