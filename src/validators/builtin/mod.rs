//! Built-in field rules

pub mod consent;
pub mod contact;
pub mod credentials;
pub mod identity;

pub use consent::{BirthdateRule, TermsRule};
pub use contact::{EmailRule, PhoneRule, WebsiteRule};
pub use credentials::{ConfirmPasswordRule, PasswordRule};
pub use identity::{FullNameRule, UsernameRule};

use regex::Regex;

/// Compile a rule pattern, naming the rule on failure
fn compile(rule: &str, pattern: &str) -> Result<Regex, String> {
    Regex::new(pattern).map_err(|e| format!("Invalid pattern for rule '{}': {}", rule, e))
}
