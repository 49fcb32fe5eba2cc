//! Validator framework for formguard
//!
//! This module maps each form field to exactly one synchronous rule and
//! evaluates field values against it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Validator Registry                │
//! ├─────────────────────────────────────────┤
//! │  • One rule per FieldId (exhaustive)    │
//! │  • Prepares trimmed / checked input     │
//! │  • Evaluates whole-form snapshots       │
//! └────────┬────────────────────────────────┘
//!          │
//!          ├──> Identity rules (username, full name)
//!          ├──> Contact rules (email, phone, website)
//!          ├──> Credential rules (password, confirmation)
//!          └──> Consent rules (birthdate, terms)
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use formguard::fields::{FieldId, FieldValue};
//! use formguard::validators::*;
//!
//! # fn example() -> Result<(), String> {
//! let registry = ValidatorRegistry::new()?;
//! let ctx = ValidationContext::now();
//!
//! let result = registry.validate(FieldId::Username, &FieldValue::from("ab"), &ctx);
//! assert_eq!(result.message(), Some("3–20 chars, letters/numbers/_ only"));
//! # Ok(())
//! # }
//! ```

pub mod builtin;
pub mod context;
pub mod registry;
pub mod result;
pub mod traits;

// Re-export commonly used types
pub use context::ValidationContext;
pub use registry::ValidatorRegistry;
pub use result::ValidationResult;
pub use traits::{FieldRule, InputKind, RuleInput};
