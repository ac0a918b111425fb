//! OIDC (OpenID Connect) configuration for the identity provider.
//!
//! The provider is addressed by its tenant domain (e.g. `example.eu.auth0.com`).
//! Every endpoint the server talks to is derived from that domain:
//! discovery, userinfo, and the logout endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Configuration for the OIDC identity provider.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// The tenant domain, e.g. "example.eu.auth0.com".
    /// A full `http(s)://` origin is accepted as well, for local test providers.
    domain: String,
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the OAuth2 callback (e.g. "http://localhost:8000/callback").
    callback_url: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,profile,email"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Where the provider sends the browser after logout.
    /// Default: "http://localhost:8000"
    #[serde(default = "default_logout_return_url")]
    logout_return_url: String,
}

fn default_scopes() -> String {
    "openid,profile,email".to_string()
}

fn default_logout_return_url() -> String {
    "http://localhost:8000".to_string()
}

impl fmt::Debug for OidcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OidcConfig")
            .field("domain", &self.domain)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("callback_url", &self.callback_url)
            .field("scopes", &self.scopes)
            .field("logout_return_url", &self.logout_return_url)
            .finish()
    }
}

impl OidcConfig {
    /// Creates a new OIDC configuration with defaults for optional fields.
    #[must_use]
    pub fn new(
        domain: String,
        client_id: String,
        client_secret: String,
        callback_url: String,
    ) -> Self {
        Self {
            domain,
            client_id,
            client_secret,
            callback_url,
            scopes: default_scopes(),
            logout_return_url: default_logout_return_url(),
        }
    }

    /// Creates a configuration builder for more customization.
    #[must_use]
    pub fn builder(
        domain: String,
        client_id: String,
        client_secret: String,
        callback_url: String,
    ) -> OidcConfigBuilder {
        OidcConfigBuilder::new(domain, client_id, client_secret, callback_url)
    }

    /// Returns the tenant domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the OAuth2 callback URL.
    #[must_use]
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Returns the OAuth2 scopes to request, parsed from comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Returns the URL the provider redirects to after logout.
    #[must_use]
    pub fn logout_return_url(&self) -> &str {
        &self.logout_return_url
    }

    /// Returns the provider origin without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim_end_matches('/');
        if domain.starts_with("https://") || domain.starts_with("http://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    /// Returns the issuer URL used for discovery.
    ///
    /// Auth0 issuers carry a trailing slash, and discovery compares the
    /// issuer in the metadata document verbatim.
    #[must_use]
    pub fn issuer_url(&self) -> String {
        format!("{}/", self.base_url())
    }

    /// Returns the fallback userinfo endpoint, used when the discovery
    /// document does not advertise one.
    #[must_use]
    pub fn userinfo_url(&self) -> String {
        format!("{}/userinfo", self.base_url())
    }

    /// Returns the provider logout URL carrying the client ID and return URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain does not form a valid URL.
    pub fn logout_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &format!("{}/v2/logout", self.base_url()),
            [
                ("client_id", self.client_id.as_str()),
                ("returnTo", self.logout_return_url.as_str()),
            ],
        )
    }
}

/// Builder for `OidcConfig`.
#[derive(Debug)]
pub struct OidcConfigBuilder {
    domain: String,
    client_id: String,
    client_secret: String,
    callback_url: String,
    scopes: Vec<String>,
    logout_return_url: String,
}

impl OidcConfigBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        domain: String,
        client_id: String,
        client_secret: String,
        callback_url: String,
    ) -> Self {
        Self {
            domain,
            client_id,
            client_secret,
            callback_url,
            scopes: vec![
                "openid".to_string(),
                "profile".to_string(),
                "email".to_string(),
            ],
            logout_return_url: default_logout_return_url(),
        }
    }

    /// Sets the OAuth2 scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Adds a scope to the list of scopes to request.
    #[must_use]
    pub fn add_scope(mut self, scope: String) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Sets the URL the provider redirects to after logout.
    #[must_use]
    pub fn logout_return_url(mut self, url: String) -> Self {
        self.logout_return_url = url;
        self
    }

    /// Builds the `OidcConfig`.
    #[must_use]
    pub fn build(self) -> OidcConfig {
        OidcConfig {
            domain: self.domain,
            client_id: self.client_id,
            client_secret: self.client_secret,
            callback_url: self.callback_url,
            scopes: self.scopes.join(","),
            logout_return_url: self.logout_return_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OidcConfig {
        OidcConfig::new(
            "tenant.auth0.com".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://localhost:8000/callback".to_string(),
        )
    }

    #[test]
    fn new_config_has_defaults() {
        let config = test_config();

        assert_eq!(config.domain(), "tenant.auth0.com");
        assert_eq!(config.client_id(), "client-id");
        assert_eq!(config.client_secret(), "client-secret");
        assert_eq!(config.callback_url(), "http://localhost:8000/callback");
        assert_eq!(config.scopes(), vec!["openid", "profile", "email"]);
        assert_eq!(config.logout_return_url(), "http://localhost:8000");
    }

    #[test]
    fn derives_endpoints_from_domain() {
        let config = test_config();

        assert_eq!(config.base_url(), "https://tenant.auth0.com");
        assert_eq!(config.issuer_url(), "https://tenant.auth0.com/");
        assert_eq!(config.userinfo_url(), "https://tenant.auth0.com/userinfo");
    }

    #[test]
    fn accepts_full_origin_as_domain() {
        let config = OidcConfig::new(
            "http://127.0.0.1:9000/".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "http://localhost:8000/callback".to_string(),
        );

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.issuer_url(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn logout_url_carries_client_id_and_return_url() {
        let config = test_config();
        let url = config.logout_url().expect("valid logout url");

        assert_eq!(url.host_str(), Some("tenant.auth0.com"));
        assert_eq!(url.path(), "/v2/logout");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params,
            vec![
                ("client_id".to_string(), "client-id".to_string()),
                ("returnTo".to_string(), "http://localhost:8000".to_string()),
            ]
        );
        assert!(url.as_str().contains("returnTo=http%3A%2F%2Flocalhost%3A8000"));
    }

    #[test]
    fn builder_allows_customization() {
        let config = OidcConfig::builder(
            "tenant.auth0.com".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/callback".to_string(),
        )
        .add_scope("offline_access".to_string())
        .logout_return_url("https://app.example.com".to_string())
        .build();

        assert!(config.scopes().contains(&"offline_access"));
        assert_eq!(config.logout_return_url(), "https://app.example.com");
    }

    #[test]
    fn builder_add_scope_does_not_duplicate() {
        let config = OidcConfig::builder(
            "tenant.auth0.com".to_string(),
            "client-id".to_string(),
            "client-secret".to_string(),
            "https://app.example.com/callback".to_string(),
        )
        .add_scope("openid".to_string()) // Already present
        .add_scope("custom".to_string())
        .build();

        let openid_count = config.scopes().iter().filter(|s| *s == &"openid").count();
        assert_eq!(openid_count, 1);
        assert!(config.scopes().contains(&"custom"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "domain": "tenant.auth0.com",
            "client_id": "my-client",
            "client_secret": "secret",
            "callback_url": "http://localhost:8000/callback"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.client_id(), "my-client");
        assert_eq!(config.scopes(), vec!["openid", "profile", "email"]);
        assert_eq!(config.logout_return_url(), "http://localhost:8000");
    }

    #[test]
    fn scopes_parses_comma_separated() {
        let json = r#"{
            "domain": "tenant.auth0.com",
            "client_id": "my-client",
            "client_secret": "secret",
            "callback_url": "http://localhost:8000/callback",
            "scopes": "openid, email, , profile"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);
    }

    #[test]
    fn debug_redacts_client_secret() {
        let debug = format!("{:?}", test_config());
        assert!(!debug.contains("client-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
