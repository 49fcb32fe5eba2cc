//! Validator registry - central dispatch from field to rule

use super::builtin::*;
use super::*;
use crate::fields::{FieldId, FieldValue};
use tracing::{debug, info};

/// Registry of all field rules
///
/// Every [`FieldId`] maps to exactly one rule; the mapping is an exhaustive
/// `match`, so a new field cannot be added without choosing its rule.
pub struct ValidatorRegistry {
    username: UsernameRule,
    full_name: FullNameRule,
    email: EmailRule,
    phone: PhoneRule,
    website: WebsiteRule,
}

impl ValidatorRegistry {
    /// Create a new validator registry with all built-in rules
    pub fn new() -> Result<Self, String> {
        info!("🔧 Registering built-in field rules");

        let registry = Self {
            username: UsernameRule::new()?,
            full_name: FullNameRule::new()?,
            email: EmailRule::new()?,
            phone: PhoneRule::new()?,
            website: WebsiteRule::new()?,
        };

        info!("✅ Registered {} field rules", FieldId::ALL.len());
        Ok(registry)
    }

    /// Get the rule for a field
    pub fn rule(&self, field: FieldId) -> &dyn FieldRule {
        match field {
            FieldId::Username => &self.username,
            FieldId::FullName => &self.full_name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Password => &PasswordRule,
            FieldId::ConfirmPassword => &ConfirmPasswordRule,
            FieldId::Website => &self.website,
            FieldId::Birthdate => &BirthdateRule,
            FieldId::Terms => &TermsRule,
        }
    }

    /// Validate a raw field value
    ///
    /// Checkbox rules see the checked state, all others the trimmed text.
    pub fn validate(
        &self,
        field: FieldId,
        value: &FieldValue,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        let rule = self.rule(field);
        let input = RuleInput::prepare(value, rule.input_kind());
        let result = rule.check(input, ctx);

        debug!(
            field = field.as_str(),
            rule = rule.name(),
            valid = result.is_valid(),
            "Evaluated field rule"
        );

        result
    }

    /// Get all rule names, in form order
    pub fn rule_names(&self) -> Vec<&str> {
        FieldId::ALL.iter().map(|id| self.rule(*id).name()).collect()
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ctx() -> ValidationContext {
        ValidationContext::at(Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap())
            .with_password("correct horse")
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[test]
    fn test_rule_table() {
        let registry = ValidatorRegistry::new().unwrap();
        let ctx = ctx();

        let cases: Vec<(FieldId, FieldValue, Option<&str>)> = vec![
            (FieldId::Username, text("ada_99"), None),
            (FieldId::Username, text("ab"), Some("3–20 chars, letters/numbers/_ only")),
            (FieldId::Username, text("no spaces"), Some("3–20 chars, letters/numbers/_ only")),
            (FieldId::FullName, text("Ada Lovelace"), None),
            (FieldId::FullName, text("A1"), Some("Enter a valid name")),
            (FieldId::Email, text("ada@example.org"), None),
            (FieldId::Email, text("ada@example"), Some("Please enter a valid email")),
            (FieldId::Phone, text("+15551234567"), None),
            (FieldId::Phone, text("12-34"), Some("Please enter a valid phone number")),
            (FieldId::Password, text("12345678"), None),
            (FieldId::Password, text("short"), Some("Password must be at least 8 characters")),
            (FieldId::ConfirmPassword, text("correct horse"), None),
            (FieldId::ConfirmPassword, text("correct horse!"), Some("Passwords do not match")),
            (FieldId::Website, text(""), None),
            (FieldId::Website, text("https://ada.dev"), None),
            (FieldId::Website, text("ada.dev"), Some("Please enter a valid URL")),
            (FieldId::Birthdate, text("1990-12-10"), None),
            (FieldId::Birthdate, text(""), Some("Date of birth is required")),
            (FieldId::Birthdate, text("2020-01-01"), Some("You must be at least 13 years old")),
            (FieldId::Terms, FieldValue::from(true), None),
            (FieldId::Terms, FieldValue::from(false), Some("You must accept the terms and conditions")),
        ];

        for (field, value, expected) in cases {
            let result = registry.validate(field, &value, &ctx);
            assert_eq!(
                result.message(),
                expected,
                "field {} with value {:?}",
                field,
                value
            );
        }
    }

    #[test]
    fn test_text_values_are_trimmed() {
        let registry = ValidatorRegistry::new().unwrap();
        let result = registry.validate(FieldId::Username, &text("  ada_99  "), &ctx());
        assert!(result.is_valid());

        let result = registry.validate(FieldId::Password, &text("  1234567  "), &ctx());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_every_field_has_a_named_rule() {
        let registry = ValidatorRegistry::new().unwrap();
        let names = registry.rule_names();
        assert_eq!(names.len(), FieldId::ALL.len());
        assert!(names.contains(&"confirm_password"));
    }
}
