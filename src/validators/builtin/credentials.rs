//! Password and password-confirmation rules

use crate::validators::*;

pub const PASSWORD_MESSAGE: &str = "Password must be at least 8 characters";
pub const CONFIRM_PASSWORD_MESSAGE: &str = "Passwords do not match";

/// Minimum password length in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Length-only password rule; strength is scored separately
pub struct PasswordRule;

impl FieldRule for PasswordRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        ValidationResult::check(input.text().chars().count() >= MIN_PASSWORD_LEN, PASSWORD_MESSAGE)
    }

    fn name(&self) -> &str {
        "password"
    }
}

/// Confirmation must equal the current password
pub struct ConfirmPasswordRule;

impl FieldRule for ConfirmPasswordRule {
    fn check(&self, input: RuleInput<'_>, ctx: &ValidationContext) -> ValidationResult {
        ValidationResult::check(input.text() == ctx.password, CONFIRM_PASSWORD_MESSAGE)
    }

    fn name(&self) -> &str {
        "confirm_password"
    }
}
