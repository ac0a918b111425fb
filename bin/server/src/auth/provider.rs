//! The identity provider seam used by the auth routes.

use async_trait::async_trait;
use signet_core::Subject;
use signet_identity::{AuthenticationError, LoginState, UserClaims};
use url::Url;

/// Tokens obtained from a successful code exchange.
#[derive(Clone)]
pub struct TokenSet {
    access_token: String,
    id_token_subject: Option<Subject>,
}

impl TokenSet {
    #[must_use]
    pub fn new(access_token: String, id_token_subject: Option<Subject>) -> Self {
        Self {
            access_token,
            id_token_subject,
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Subject of the verified ID token, when the provider returned one.
    #[must_use]
    pub fn id_token_subject(&self) -> Option<&Subject> {
        self.id_token_subject.as_ref()
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[redacted]")
            .field("id_token_subject", &self.id_token_subject)
            .finish()
    }
}

/// An OpenID Connect provider performing the authorization-code flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the URL to send the browser to, and the state to keep until
    /// the provider redirects back.
    fn authorization_request(&self) -> (Url, LoginState);

    /// Exchanges an authorization code for tokens.
    async fn exchange_code(
        &self,
        code: &str,
        login: &LoginState,
    ) -> Result<TokenSet, AuthenticationError>;

    /// Fetches the user's claims with the access token.
    async fn user_info(&self, tokens: &TokenSet) -> Result<UserClaims, AuthenticationError>;

    /// The provider's logout endpoint.
    fn logout_url(&self) -> Url;
}
