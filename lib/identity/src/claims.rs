//! User claims as returned by the provider's userinfo endpoint.
//!
//! The claim set is kept opaque: whatever the provider returns is stored and
//! echoed back verbatim. The only structural requirement is a non-empty
//! string `sub`, which identifies the user.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use signet_core::Subject;

use crate::error::AuthenticationError;

/// Name of the subject claim.
pub const SUBJECT_CLAIM: &str = "sub";

/// A validated set of user claims.
///
/// Serializes as the plain claims object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct UserClaims {
    subject: Subject,
    claims: Map<String, Value>,
}

impl UserClaims {
    /// Returns the subject identifier.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns a claim by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Returns the `email` claim, if it is a string.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }

    /// Returns the `name` claim, if it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.claims
    }
}

impl TryFrom<Map<String, Value>> for UserClaims {
    type Error = AuthenticationError;

    fn try_from(claims: Map<String, Value>) -> Result<Self, Self::Error> {
        let subject = match claims.get(SUBJECT_CLAIM) {
            None | Some(Value::Null) => {
                return Err(AuthenticationError::MissingClaim {
                    claim: SUBJECT_CLAIM.to_string(),
                });
            }
            Some(Value::String(sub)) => {
                Subject::try_from(sub.clone()).map_err(|e| AuthenticationError::InvalidClaim {
                    claim: SUBJECT_CLAIM.to_string(),
                    reason: e.to_string(),
                })?
            }
            Some(_) => {
                return Err(AuthenticationError::InvalidClaim {
                    claim: SUBJECT_CLAIM.to_string(),
                    reason: "expected a string".to_string(),
                });
            }
        };

        Ok(Self { subject, claims })
    }
}

impl TryFrom<Value> for UserClaims {
    type Error = AuthenticationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::try_from(map),
            _ => Err(AuthenticationError::InvalidClaim {
                claim: "claims".to_string(),
                reason: "expected a JSON object".to_string(),
            }),
        }
    }
}

impl From<UserClaims> for Map<String, Value> {
    fn from(claims: UserClaims) -> Self {
        claims.claims
    }
}
