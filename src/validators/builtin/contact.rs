//! Email, phone and website rules

use super::compile;
use crate::validators::*;
use regex::Regex;

pub const EMAIL_MESSAGE: &str = "Please enter a valid email";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const WEBSITE_MESSAGE: &str = "Please enter a valid URL";

/// Simple `local@domain.tld` shape, not full RFC 5322
pub struct EmailRule {
    pattern: Regex,
}

impl EmailRule {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            pattern: compile("email", r"^\S+@\S+\.\S+$")?,
        })
    }
}

impl FieldRule for EmailRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        ValidationResult::check(self.pattern.is_match(input.text()), EMAIL_MESSAGE)
    }

    fn name(&self) -> &str {
        "email"
    }
}

/// Optional leading `+`, then 7 to 15 digits
pub struct PhoneRule {
    pattern: Regex,
}

impl PhoneRule {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            pattern: compile("phone", r"^\+?[0-9]{7,15}$")?,
        })
    }
}

impl FieldRule for PhoneRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        ValidationResult::check(self.pattern.is_match(input.text()), PHONE_MESSAGE)
    }

    fn name(&self) -> &str {
        "phone"
    }
}

/// Empty, or an http(s) URL containing a dot
pub struct WebsiteRule {
    pattern: Regex,
}

impl WebsiteRule {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            pattern: compile("website", r"^https?://.+\..+")?,
        })
    }
}

impl FieldRule for WebsiteRule {
    fn check(&self, input: RuleInput<'_>, _ctx: &ValidationContext) -> ValidationResult {
        let value = input.text();
        ValidationResult::check(value.is_empty() || self.pattern.is_match(value), WEBSITE_MESSAGE)
    }

    fn name(&self) -> &str {
        "website"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        let rule = EmailRule::new().unwrap();
        let ctx = ValidationContext::now();

        assert!(rule.check(RuleInput::Text("ada@example.com"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("ada@example"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("ada example@x.io"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("example.com"), &ctx).is_valid());
    }

    #[test]
    fn test_phone_digits() {
        let rule = PhoneRule::new().unwrap();
        let ctx = ValidationContext::now();

        assert!(rule.check(RuleInput::Text("+4915112345678"), &ctx).is_valid());
        assert!(rule.check(RuleInput::Text("1234567"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("123456"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("1234567890123456"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("555-1234"), &ctx).is_valid());
    }

    #[test]
    fn test_website_optional() {
        let rule = WebsiteRule::new().unwrap();
        let ctx = ValidationContext::now();

        assert!(rule.check(RuleInput::Text(""), &ctx).is_valid());
        assert!(rule.check(RuleInput::Text("https://example.com"), &ctx).is_valid());
        assert!(rule.check(RuleInput::Text("http://a.b"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("ftp://example.com"), &ctx).is_valid());
        assert!(!rule.check(RuleInput::Text("https://localhost"), &ctx).is_valid());
    }
}
