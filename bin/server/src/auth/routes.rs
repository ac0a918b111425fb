//! Authentication routes for login, callback, and logout.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use signet_identity::{AuthenticationError, UserClaims};
use signet_user_store::save_if_absent;
use std::fmt;
use tracing::{debug, info};

use super::{
    AppState,
    session::{self, AUTH_STATE_COOKIE, SESSION_COOKIE, SessionError},
};

/// Query parameters for the OIDC callback.
///
/// The provider sends either `code` and `state`, or `error` and
/// `error_description`.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Initiates the OIDC login flow by redirecting to the identity provider.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, SessionError> {
    let (auth_url, login_state) = state.provider.authorization_request();

    // Store the login state in a signed cookie for validation on callback
    let cookie = session::auth_state_cookie(&login_state, &state.session_config)?;

    debug!("redirecting to identity provider");

    Ok((
        StatusCode::FOUND,
        jar.add(cookie),
        [(LOCATION, auth_url.to_string())],
    ))
}

/// Handles the OIDC callback after the user authenticates with the identity provider.
///
/// On success the user's claims are recorded if the subject is new, stored
/// in the session, and returned as the response body.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<UserClaims>), CallbackError> {
    if let Some(error) = query.error {
        return Err(AuthenticationError::Callback {
            error,
            description: query.error_description,
        }
        .into());
    }

    let login_state =
        session::read_login_state(&jar).ok_or(AuthenticationError::MissingAuthState)?;

    let returned_state = query
        .state
        .ok_or_else(|| AuthenticationError::MissingParameter {
            name: "state".to_string(),
        })?;

    // Validate CSRF token
    if !login_state.matches_state(&returned_state) {
        return Err(AuthenticationError::StateMismatch.into());
    }

    let code = query
        .code
        .ok_or_else(|| AuthenticationError::MissingParameter {
            name: "code".to_string(),
        })?;

    let tokens = state.provider.exchange_code(&code, &login_state).await?;
    let claims = state.provider.user_info(&tokens).await?;

    let outcome = save_if_absent(state.users.as_ref(), &claims).await;
    debug!(?outcome, "user record checked");

    let session_cookie = session::session_cookie(&claims, &state.session_config)?;
    let jar = jar
        .add(session_cookie)
        .add(session::removal_cookie(AUTH_STATE_COOKIE, &state.session_config));

    info!(sub = %claims.subject(), "user logged in");

    Ok((jar, Json(claims)))
}

/// Logs out the user by clearing the session and redirecting to the
/// provider's logout endpoint.
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    if let Some(claims) = session::read_session(&jar) {
        info!(sub = %claims.subject(), "user logged out");
    }

    let jar = jar
        .add(session::removal_cookie(SESSION_COOKIE, &state.session_config))
        .add(session::removal_cookie(AUTH_STATE_COOKIE, &state.session_config));

    (
        StatusCode::FOUND,
        jar,
        [(LOCATION, state.provider.logout_url().to_string())],
    )
}

/// Failure on the callback path. Always rendered as a 500 with a JSON
/// `error` message.
#[derive(Debug)]
pub enum CallbackError {
    Authentication(AuthenticationError),
    Session(SessionError),
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication(e) => write!(f, "{e}"),
            Self::Session(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CallbackError {}

impl From<AuthenticationError> for CallbackError {
    fn from(e: AuthenticationError) -> Self {
        Self::Authentication(e)
    }
}

impl From<SessionError> for CallbackError {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "login callback failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
