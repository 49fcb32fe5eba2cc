//! Username and full-name rules

use super::compile;
use crate::validators::*;
use regex::Regex;

pub const USERNAME_MESSAGE: &str = "3–20 chars, letters/numbers/_ only";
pub const FULL_NAME_MESSAGE: &str = "Enter a valid name";

/// 3 to 20 letters, digits or underscores
pub struct UsernameRule {
    pattern: Regex,
}

impl UsernameRule {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            pattern: compile("username", r"^[a-zA-Z0-9_]{3,20}$")?,
        })
    }
}

impl FieldRule for UsernameRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        ValidationResult::check(self.pattern.is_match(input.text()), USERNAME_MESSAGE)
    }

    fn name(&self) -> &str {
        "username"
    }
}

/// At least three letters or spaces
pub struct FullNameRule {
    pattern: Regex,
}

impl FullNameRule {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            pattern: compile("full_name", r"^[A-Za-z\s]{3,}$")?,
        })
    }
}

impl FieldRule for FullNameRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        ValidationResult::check(self.pattern.is_match(input.text()), FULL_NAME_MESSAGE)
    }

    fn name(&self) -> &str {
        "full_name"
    }
}
