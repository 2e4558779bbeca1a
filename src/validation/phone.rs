//! Indian mobile number rule.
//!
//! Accepts an optional `+91` (optionally followed by a dash or space), a
//! leading `0`, or a `91` prefix, followed by a 10-digit number whose first
//! digit falls inside a configurable range.

use regex::Regex;
use std::str::FromStr;

/// Errors raised while building a phone rule.
#[derive(Debug, thiserror::Error)]
pub enum PhoneRuleError {
    /// Range could not be parsed or is out of order
    #[error("Invalid leading digit range '{0}', expected e.g. \"6-9\"")]
    InvalidRange(String),

    /// Generated pattern failed to compile
    #[error("Failed to compile phone pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Matches phone numbers against the Indian mobile pattern.
///
#[derive(Clone, Debug)]
pub struct PhoneRule {
    pattern: Regex,
}

impl PhoneRule {
    /// Build a rule accepting numbers whose first significant digit lies in
    /// `first..=last`.
    ///
    pub fn new(first: u8, last: u8) -> Result<Self, PhoneRuleError> {
        if first > 9 || last > 9 || first > last {
            return Err(PhoneRuleError::InvalidRange(format!("{}-{}", first, last)));
        }
        let pattern = Regex::new(&format!(
            r"^(\+91[\-\s]?)?0?(91)?[{}-{}][0-9]{{9}}$",
            first, last
        ))?;
        Ok(PhoneRule { pattern })
    }

    pub fn matches(&self, phone: &str) -> bool {
        self.pattern.is_match(phone)
    }
}

impl Default for PhoneRule {
    fn default() -> Self {
        PhoneRule::new(6, 9).expect("static phone rule is valid")
    }
}

impl FromStr for PhoneRule {
    type Err = PhoneRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PhoneRuleError::InvalidRange(s.to_string());
        let (first, last) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digit = |part: &str| match part.trim().as_bytes() {
            [d @ b'0'..=b'9'] => Ok(d - b'0'),
            _ => Err(invalid()),
        };
        PhoneRule::new(digit(first)?, digit(last)?)
    }
}
