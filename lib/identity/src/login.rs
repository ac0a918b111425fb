//! State carried between `/login` and `/callback`.

use serde::{Deserialize, Serialize};

/// Per-attempt secrets generated when a login starts.
///
/// The CSRF token is echoed back by the provider as `state`; the PKCE
/// verifier and nonce are needed to complete the token exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    csrf_token: String,
    pkce_verifier: String,
    nonce: String,
}

impl LoginState {
    #[must_use]
    pub fn new(csrf_token: String, pkce_verifier: String, nonce: String) -> Self {
        Self {
            csrf_token,
            pkce_verifier,
            nonce,
        }
    }

    #[must_use]
    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    #[must_use]
    pub fn pkce_verifier(&self) -> &str {
        &self.pkce_verifier
    }

    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Returns true if `state` is the CSRF token issued for this attempt.
    #[must_use]
    pub fn matches_state(&self, state: &str) -> bool {
        !self.csrf_token.is_empty() && self.csrf_token == state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_issued_state_only() {
        let login = LoginState::new(
            "csrf".to_string(),
            "verifier".to_string(),
            "nonce".to_string(),
        );

        assert!(login.matches_state("csrf"));
        assert!(!login.matches_state("other"));
        assert!(!login.matches_state(""));
    }

    #[test]
    fn empty_token_never_matches() {
        let login = LoginState::new(String::new(), "v".to_string(), "n".to_string());
        assert!(!login.matches_state(""));
    }

    #[test]
    fn serializes_all_fields() {
        let login = LoginState::new("c".to_string(), "v".to_string(), "n".to_string());
        let json = serde_json::to_string(&login).expect("serialize");
        let back: LoginState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, login);
        assert_eq!(back.pkce_verifier(), "v");
        assert_eq!(back.nonce(), "n");
    }
}
