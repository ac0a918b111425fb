//! Signed cookie session.
//!
//! Two cookies are used, both signed with the server key:
//! - `auth_state` carries the `LoginState` from `/login` to `/callback`
//! - `session` carries the authenticated user's claims
//!
//! Values are JSON encoded as unpadded base64url so they are valid cookie
//! octets whatever the claims contain.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Serialize, de::DeserializeOwned};
use signet_identity::{LoginState, UserClaims};
use std::fmt;
use time::Duration as TimeDuration;

use crate::config::SessionConfig;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Auth state cookie name (for CSRF protection during OIDC flow).
pub const AUTH_STATE_COOKIE: &str = "auth_state";

/// Minimum signing secret length accepted by the cookie key derivation.
pub const MIN_SECRET_LEN: usize = 64;

/// Longest accepted session lifetime, one year.
pub const MAX_SESSION_MINUTES: i64 = 366 * 24 * 60;

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A value could not be serialized into a cookie.
    Encoding { details: String },
    /// The configured signing secret is too short.
    WeakSecret { length: usize },
    /// The configured session lifetime is not a usable cookie max-age.
    InvalidDuration { minutes: i64 },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding { details } => {
                write!(f, "failed to encode session cookie: {details}")
            }
            Self::WeakSecret { length } => {
                write!(
                    f,
                    "session secret must be at least {MIN_SECRET_LEN} bytes, got {length}"
                )
            }
            Self::InvalidDuration { minutes } => {
                write!(
                    f,
                    "session duration must be between 1 and {MAX_SESSION_MINUTES} minutes, got {minutes}"
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "session error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Derives the cookie signing key from configuration.
///
/// Without a configured secret a random key is generated, which
/// invalidates every session when the process restarts.
pub fn signing_key(config: &SessionConfig) -> Result<Key, SessionError> {
    match &config.secret {
        Some(secret) if secret.len() < MIN_SECRET_LEN => Err(SessionError::WeakSecret {
            length: secret.len(),
        }),
        Some(secret) => Ok(Key::from(secret.as_bytes())),
        None => {
            tracing::warn!("SESSION__SECRET not set, using a random signing key");
            Ok(Key::generate())
        }
    }
}

/// Checks that the configured session lifetime fits a cookie max-age.
pub fn session_duration(config: &SessionConfig) -> Result<TimeDuration, SessionError> {
    match config.duration_minutes {
        minutes @ 1..=MAX_SESSION_MINUTES => Ok(TimeDuration::minutes(minutes)),
        minutes => Err(SessionError::InvalidDuration { minutes }),
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, SessionError> {
    let json = serde_json::to_vec(value).map_err(|e| SessionError::Encoding {
        details: e.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode<T: DeserializeOwned>(value: &str) -> Option<T> {
    let json = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}

fn build_cookie(
    name: &'static str,
    value: String,
    config: &SessionConfig,
    max_age: TimeDuration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Builds the short-lived cookie holding an in-progress login.
pub fn auth_state_cookie(
    login: &LoginState,
    config: &SessionConfig,
) -> Result<Cookie<'static>, SessionError> {
    Ok(build_cookie(
        AUTH_STATE_COOKIE,
        encode(login)?,
        config,
        TimeDuration::minutes(10),
    ))
}

/// Builds the session cookie holding the user's claims.
pub fn session_cookie(
    claims: &UserClaims,
    config: &SessionConfig,
) -> Result<Cookie<'static>, SessionError> {
    Ok(build_cookie(
        SESSION_COOKIE,
        encode(claims)?,
        config,
        session_duration(config)?,
    ))
}

/// Builds a cookie that makes the browser drop `name`.
pub fn removal_cookie(name: &'static str, config: &SessionConfig) -> Cookie<'static> {
    build_cookie(name, String::new(), config, TimeDuration::ZERO)
}

/// Reads the in-progress login, if the cookie is present and verifies.
pub fn read_login_state(jar: &SignedCookieJar) -> Option<LoginState> {
    jar.get(AUTH_STATE_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
}

/// Reads the claims of the logged-in user, if any.
pub fn read_session(jar: &SignedCookieJar) -> Option<UserClaims> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
    use serde_json::json;

    fn claims() -> UserClaims {
        UserClaims::try_from(json!({
            "sub": "auth0|alice",
            "name": "Alice; \"A\" Smith",
        }))
        .expect("valid claims")
    }

    #[test]
    fn rejects_short_secret() {
        let config = SessionConfig {
            secret: Some("too-short".to_string()),
            ..SessionConfig::default()
        };
        assert_eq!(
            signing_key(&config).err(),
            Some(SessionError::WeakSecret { length: 9 })
        );
    }

    #[test]
    fn accepts_long_secret() {
        let config = SessionConfig {
            secret: Some("x".repeat(MIN_SECRET_LEN)),
            ..SessionConfig::default()
        };
        assert!(signing_key(&config).is_ok());
    }

    #[test]
    fn session_cookie_has_secure_attributes() {
        let config = SessionConfig {
            secure_cookies: true,
            ..SessionConfig::default()
        };
        let cookie = session_cookie(&claims(), &config).expect("cookie");

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert!(!cookie.value().contains(';'));
        assert!(!cookie.value().contains('"'));
    }

    #[test]
    fn auth_state_cookie_expires_after_ten_minutes() {
        let login = LoginState::new("c".to_string(), "v".to_string(), "n".to_string());
        let cookie = auth_state_cookie(&login, &SessionConfig::default()).expect("cookie");

        assert_eq!(cookie.max_age(), Some(TimeDuration::minutes(10)));
    }

    #[test]
    fn signed_session_reads_back() {
        let jar = SignedCookieJar::new(Key::generate());
        let cookie = session_cookie(&claims(), &SessionConfig::default()).expect("cookie");
        let jar = jar.add(cookie);

        assert_eq!(read_session(&jar), Some(claims()));
    }

    #[test]
    fn forged_session_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=eyJzdWIiOiJ4In0"));
        let jar = SignedCookieJar::from_headers(&headers, Key::generate());

        assert_eq!(read_session(&jar), None);
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let config = SessionConfig {
            secure_cookies: true,
            ..SessionConfig::default()
        };
        let cookie = removal_cookie(SESSION_COOKIE, &config);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn default_duration_is_accepted() {
        assert_eq!(
            session_duration(&SessionConfig::default()),
            Ok(TimeDuration::days(14))
        );
    }

    #[test]
    fn out_of_range_durations_are_rejected() {
        for minutes in [0, -5, MAX_SESSION_MINUTES + 1, i64::MAX / 2] {
            let config = SessionConfig {
                duration_minutes: minutes,
                ..SessionConfig::default()
            };
            assert_eq!(
                session_duration(&config),
                Err(SessionError::InvalidDuration { minutes })
            );
            assert!(session_cookie(&claims(), &config).is_err());
        }
    }
}
