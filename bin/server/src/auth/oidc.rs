//! OIDC client implementation using the openidconnect crate.

use async_trait::async_trait;
use openidconnect::core::{CoreAuthenticationFlow, CoreClient, CoreProviderMetadata};
use openidconnect::{
    AuthorizationCode, ClientId, ClientSecret, CsrfToken, IssuerUrl, Nonce, OAuth2TokenResponse,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
};
use reqwest::header::ACCEPT;
use serde_json::Value;
use signet_core::Subject;
use signet_identity::claims::SUBJECT_CLAIM;
use signet_identity::{AuthenticationError, LoginState, OidcConfig, UserClaims};
use tracing::debug;
use url::Url;

use super::provider::{IdentityProvider, TokenSet};

/// OIDC client for authenticating users.
pub struct OidcClient {
    provider_metadata: CoreProviderMetadata,
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    userinfo_url: Url,
    logout_url: Url,
    http_client: reqwest::Client,
    config: OidcConfig,
}

impl OidcClient {
    /// Creates a new OIDC client by discovering the provider metadata.
    pub async fn discover(config: OidcConfig) -> Result<Self, AuthenticationError> {
        let issuer_url =
            IssuerUrl::new(config.issuer_url()).map_err(|e| AuthenticationError::Configuration {
                reason: format!("invalid issuer URL: {e}"),
            })?;

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthenticationError::Configuration {
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http_client)
            .await
            .map_err(|e| AuthenticationError::Discovery {
                reason: format!("failed to discover provider: {e}"),
            })?;

        Self::from_metadata(config, provider_metadata, http_client)
    }

    /// Creates a client from already-known provider metadata.
    pub fn from_metadata(
        config: OidcConfig,
        provider_metadata: CoreProviderMetadata,
        http_client: reqwest::Client,
    ) -> Result<Self, AuthenticationError> {
        let redirect_url = RedirectUrl::new(config.callback_url().to_string()).map_err(|e| {
            AuthenticationError::Configuration {
                reason: format!("invalid callback URL: {e}"),
            }
        })?;

        let userinfo_url = match provider_metadata.userinfo_endpoint() {
            Some(endpoint) => endpoint.url().clone(),
            None => Url::parse(&config.userinfo_url()).map_err(|e| {
                AuthenticationError::Configuration {
                    reason: format!("invalid userinfo URL: {e}"),
                }
            })?,
        };

        let logout_url = config
            .logout_url()
            .map_err(|e| AuthenticationError::Configuration {
                reason: format!("invalid logout URL: {e}"),
            })?;

        let client_id = ClientId::new(config.client_id().to_string());
        let client_secret = ClientSecret::new(config.client_secret().to_string());

        Ok(Self {
            provider_metadata,
            client_id,
            client_secret,
            redirect_url,
            userinfo_url,
            logout_url,
            http_client,
            config,
        })
    }

    /// Returns the endpoint claims are fetched from.
    pub fn userinfo_url(&self) -> &Url {
        &self.userinfo_url
    }

    fn provider_error(&self, reason: String) -> AuthenticationError {
        AuthenticationError::ProviderError {
            provider: self.config.domain().to_string(),
            reason,
        }
    }
}

#[async_trait]
impl IdentityProvider for OidcClient {
    fn authorization_request(&self) -> (Url, LoginState) {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = client
            .authorize_url(
                CoreAuthenticationFlow::AuthorizationCode,
                CsrfToken::new_random,
                Nonce::new_random,
            )
            .set_pkce_challenge(pkce_challenge);

        // `openid` is always requested by the flow itself
        for scope in self.config.scopes() {
            if scope != "openid" {
                auth_request = auth_request.add_scope(Scope::new(scope.to_string()));
            }
        }

        let (auth_url, csrf_token, nonce) = auth_request.url();

        let login = LoginState::new(
            csrf_token.secret().clone(),
            pkce_verifier.secret().clone(),
            nonce.secret().clone(),
        );

        (auth_url, login)
    }

    async fn exchange_code(
        &self,
        code: &str,
        login: &LoginState,
    ) -> Result<TokenSet, AuthenticationError> {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let pkce_verifier = PkceCodeVerifier::new(login.pkce_verifier().to_string());

        let token_request = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| AuthenticationError::TokenExchange {
                reason: format!("token endpoint error: {e}"),
            })?;

        let token_response = token_request
            .set_pkce_verifier(pkce_verifier)
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthenticationError::TokenExchange {
                reason: e.to_string(),
            })?;

        // The ID token is optional here; claims come from the userinfo endpoint
        let id_token_subject = match token_response.id_token() {
            Some(id_token) => {
                let nonce = Nonce::new(login.nonce().to_string());
                let claims = id_token
                    .claims(&client.id_token_verifier(), &nonce)
                    .map_err(|e| AuthenticationError::InvalidToken {
                        reason: format!("ID token validation failed: {e}"),
                    })?;
                let subject = Subject::try_from(claims.subject().to_string()).map_err(|e| {
                    AuthenticationError::InvalidToken {
                        reason: e.to_string(),
                    }
                })?;
                Some(subject)
            }
            None => {
                debug!("token response carried no ID token");
                None
            }
        };

        Ok(TokenSet::new(
            token_response.access_token().secret().clone(),
            id_token_subject,
        ))
    }

    async fn user_info(&self, tokens: &TokenSet) -> Result<UserClaims, AuthenticationError> {
        let response = self
            .http_client
            .get(self.userinfo_url.clone())
            .bearer_auth(tokens.access_token())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.provider_error(format!("userinfo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| self.provider_error(format!("userinfo request rejected: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.provider_error(format!("invalid userinfo response: {e}")))?;

        let claims = UserClaims::try_from(body)?;

        if let Some(expected) = tokens.id_token_subject() {
            if claims.subject() != expected {
                return Err(AuthenticationError::InvalidClaim {
                    claim: SUBJECT_CLAIM.to_string(),
                    reason: "userinfo subject does not match the ID token".to_string(),
                });
            }
        }

        Ok(claims)
    }

    fn logout_url(&self) -> Url {
        self.logout_url.clone()
    }
}
