use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Suffix appended to raw digits to build the network member identifier
pub const MEMBER_ID_SUFFIX: &str = "@s.whatsapp.net";

pub const MIN_DIGITS: usize = 10;
pub const MAX_DIGITS: usize = 15;

/// Outcome of validating a candidate phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Value object representing a tag member phone number
///
/// Rules:
/// - Only ASCII decimal digits (after trimming)
/// - Between 10 and 15 digits inclusive
/// - No country-code or locale checks
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Classify a candidate without constructing anything
    pub fn validate(candidate: &str) -> Validation {
        let digits = candidate.trim();
        let in_range = (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len());
        if in_range && digits.bytes().all(|b| b.is_ascii_digit()) {
            Validation::Valid
        } else {
            Validation::Invalid
        }
    }

    /// Create a PhoneNumber with validation
    pub fn parse(candidate: &str) -> Result<Self> {
        match Self::validate(candidate) {
            Validation::Valid => Ok(Self(candidate.trim().to_string())),
            Validation::Invalid => Err(DomainError::InvalidPhoneNumber(format!(
                "{:?} must be {}-{} digits",
                candidate.trim(),
                MIN_DIGITS,
                MAX_DIGITS
            ))),
        }
    }

    /// Raw digits, the canonical stored form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full network identifier used when mentioning this member
    pub fn member_id(&self) -> String {
        format!("{}{}", self.0, MEMBER_ID_SUFFIX)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
