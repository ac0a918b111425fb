//! The OIDC subject identifier.
//!
//! Every user record is keyed by the `sub` claim issued by the identity
//! provider. Wrapping it in a dedicated type keeps raw claim strings from
//! being used as store keys without validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not a usable subject identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSubjectError {
    /// The reason for the parse failure.
    pub reason: &'static str,
}

impl fmt::Display for ParseSubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse subject: {}", self.reason)
    }
}

impl std::error::Error for ParseSubjectError {}

/// Stable unique identifier for a user, as issued by the identity provider.
///
/// Subjects are opaque: `auth0|5f7c8ec7c33c6c004bbafe82`, `google-oauth2|1029…`
/// and plain UUIDs are all valid. The only requirement is that the value
/// is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// Returns the subject as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Subject {
    type Err = ParseSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for Subject {
    type Error = ParseSubjectError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(ParseSubjectError {
                reason: "subject is empty",
            });
        }
        Ok(Self(s))
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
