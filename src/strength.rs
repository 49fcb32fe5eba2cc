//! Password strength scoring
//!
//! Presentation only: the score drives the strength meter and has no bearing
//! on whether the password field is valid.

use serde::{Deserialize, Serialize};

/// Discrete password strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    None,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

/// Highest raw score
pub const MAX_SCORE: u8 = 4;

impl StrengthLevel {
    fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLevel::None,
            1 => StrengthLevel::Weak,
            2 => StrengthLevel::Medium,
            3 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }

    /// Raw score, 0 to 4
    pub fn score(&self) -> u8 {
        match self {
            StrengthLevel::None => 0,
            StrengthLevel::Weak => 1,
            StrengthLevel::Medium => 2,
            StrengthLevel::Strong => 3,
            StrengthLevel::VeryStrong => 4,
        }
    }

    /// Label shown next to the meter
    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::None => "None",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }

    /// Meter fill, 0 to 100
    pub fn meter_percent(&self) -> u8 {
        (u16::from(self.score()) * 100 / u16::from(MAX_SCORE)) as u8
    }

    /// Meter colour
    pub fn color(&self) -> &'static str {
        match self {
            StrengthLevel::None => "#eee",
            StrengthLevel::Weak => "#dc3545",
            StrengthLevel::Medium => "#fd7e14",
            StrengthLevel::Strong => "#ffc107",
            StrengthLevel::VeryStrong => "#28a745",
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Strength: {}", self.label())
    }
}

/// Score a password
///
/// One point each for: at least 8 chars, at least 12 chars, an ASCII
/// uppercase letter, an ASCII digit, and a char that is neither. Capped at 4.
pub fn score(password: &str) -> StrengthLevel {
    let len = password.chars().count();
    let checks = [
        len >= 8,
        len >= 12,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];

    let raw = checks.iter().filter(|passed| **passed).count() as u8;
    StrengthLevel::from_score(raw.min(MAX_SCORE))
}
