//! # formguard - Registration Form Engine
//!
//! formguard validates a user-registration form as it is filled in, tracks
//! completion progress, gates the submit control and orchestrates the
//! submission to a registration backend.
//!
//! ## Features
//! - Per-field synchronous rules with cross-field password confirmation
//! - Progress percentage and submit gating recomputed on every change
//! - Debounced username uniqueness checks with stale-response protection
//! - Password strength meter
//! - Async submission with structured error reporting
//! - TOML-based configuration
//!
//! ## Author
//! a13x.h.cc@gmail.com

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod fields;
pub mod progress;
pub mod remote;
pub mod strength;
pub mod sync;
pub mod validators;

pub use config::Config;
pub use controller::FormController;
pub use error::{ApiError, FormError};
pub use fields::{FieldId, FieldValue};
