use crate::{ErrorLocation, ModelError};

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// A curated keyword.
///
/// Always trimmed and never empty. Equality is exact and case-sensitive:
/// `"NLP"` and `"nlp"` are distinct keywords.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keyword(String);

impl Keyword {
    /// Trim `text` and wrap it as a keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if nothing is left after trimming.
    #[track_caller]
    pub fn parse(text: impl AsRef<str>) -> Result<Self, ModelError> {
        let trimmed = text.as_ref().trim();

        if trimmed.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Keyword cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Keyword {
    type Error = ModelError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Keyword::parse(value)
    }
}

impl TryFrom<&str> for Keyword {
    type Error = ModelError;

    #[track_caller]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Keyword::parse(value)
    }
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        keyword.0
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Keyword {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Keyword {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
