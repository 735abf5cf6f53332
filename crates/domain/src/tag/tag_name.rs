use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object representing a tag label
///
/// Names are compared case-insensitively after trimming, so the canonical
/// form is the trimmed, lowercased text. Inner whitespace is kept
/// (`"2nd years"` is a valid name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Create a normalized TagName
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let normalized = name.as_ref().trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::InvalidTagName(
                "Tag name cannot be empty".to_string(),
            ));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name with all whitespace removed
    pub fn compact(&self) -> String {
        self.0.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Command that mentions every member of this tag, e.g. `tag2ndyears!`
    pub fn invocation(&self) -> String {
        format!("tag{}!", self.compact())
    }
}

impl TryFrom<String> for TagName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
