//! Birthdate (minimum age) and terms-acceptance rules

use crate::validators::*;
use chrono::{DateTime, NaiveDate, Utc};

pub const BIRTHDATE_REQUIRED_MESSAGE: &str = "Date of birth is required";
pub const MINIMUM_AGE_MESSAGE: &str = "You must be at least 13 years old";
pub const TERMS_MESSAGE: &str = "You must accept the terms and conditions";

/// Minimum age in years
pub const MINIMUM_AGE_YEARS: f64 = 13.0;

/// Milliseconds in a 365.25-day year
const MILLIS_PER_YEAR: f64 = 31_557_600_000.0;

/// Birthdate must be present and at least 13 years before now
pub struct BirthdateRule;

impl BirthdateRule {
    /// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp
    fn parse(value: &str) -> Option<DateTime<Utc>> {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Age in 365.25-day years at `now`
    pub fn age_years(birth: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        (now - birth).num_milliseconds() as f64 / MILLIS_PER_YEAR
    }
}

impl FieldRule for BirthdateRule {
    fn check(&self, input: RuleInput<'_>, ctx: &ValidationContext) -> ValidationResult {
        let value = input.text();
        if value.is_empty() {
            return ValidationResult::invalid(BIRTHDATE_REQUIRED_MESSAGE);
        }

        // An unparseable date has no age, so it cannot meet the minimum
        let old_enough = Self::parse(value)
            .map(|birth| Self::age_years(birth, ctx.now) >= MINIMUM_AGE_YEARS)
            .unwrap_or(false);

        ValidationResult::check(old_enough, MINIMUM_AGE_MESSAGE)
    }

    fn name(&self) -> &str {
        "birthdate"
    }
}

/// Terms checkbox must be checked
pub struct TermsRule;

impl FieldRule for TermsRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        let checked = match input {
            RuleInput::Checked(c) => c,
            RuleInput::Text(s) => !s.is_empty(),
        };
        ValidationResult::check(checked, TERMS_MESSAGE)
    }

    fn name(&self) -> &str {
        "terms"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ctx() -> ValidationContext {
        ValidationContext::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_birthdate_required() {
        let result = BirthdateRule.check(RuleInput::Text(""), &ctx());
        assert_eq!(result.message(), Some(BIRTHDATE_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_birthdate_minimum_age() {
        assert!(BirthdateRule.check(RuleInput::Text("2000-01-01"), &ctx()).is_valid());
        assert!(BirthdateRule.check(RuleInput::Text("2011-05-01"), &ctx()).is_valid());

        let result = BirthdateRule.check(RuleInput::Text("2015-01-01"), &ctx());
        assert_eq!(result.message(), Some(MINIMUM_AGE_MESSAGE));
    }

    #[test]
    fn test_birthdate_unparseable_fails_age() {
        let result = BirthdateRule.check(RuleInput::Text("last tuesday"), &ctx());
        assert_eq!(result.message(), Some(MINIMUM_AGE_MESSAGE));
    }

    #[test]
    fn test_birthdate_rfc3339() {
        assert!(BirthdateRule
            .check(RuleInput::Text("1990-03-04T10:00:00+02:00"), &ctx())
            .is_valid());
    }

    #[test]
    fn test_terms_checked() {
        assert!(TermsRule.check(RuleInput::Checked(true), &ctx()).is_valid());
        assert_eq!(
            TermsRule.check(RuleInput::Checked(false), &ctx()).message(),
            Some(TERMS_MESSAGE)
        );
    }
}
