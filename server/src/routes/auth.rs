//! Editor auth routes: shared-password login, session status, logout.
//!
//! DESIGN
//! ======
//! A successful login sets two cookies. `loremap-session` carries the
//! session token and is http-only. `loremap-author` carries the chosen
//! author name and stays readable so the host page can show who is editing.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use tracing::{error, info, warn};

use super::error_response;
use crate::services::session;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "loremap-session";
pub const AUTHOR_COOKIE: &str = "loremap-author";

fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(Cookie::value).filter(|t| !t.is_empty())
}

fn build_cookie(name: &'static str, value: String, http_only: bool, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(http_only)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Editor extracted from the session cookie.
/// Use as a handler parameter to require write access.
pub struct AuthEditor {
    pub name: String,
}

impl<S> FromRequestParts<S> for AuthEditor
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = session_token(&jar) else {
            return Err(error_response(StatusCode::UNAUTHORIZED, "unauthorized"));
        };

        let app_state = AppState::from_ref(state);
        let name = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| {
                error!(error = %e, "session lookup failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "session lookup failed")
            })?
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "unauthorized"))?;

        Ok(Self { name })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub name: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AuthStatus {
    fn anonymous() -> Self {
        Self { authenticated: false, name: None }
    }
}

/// `POST /api/auth`: check the editor password, open a session, set cookies.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "missing password");
    };

    if !session::passwords_match(&body.password, &state.config.editor_password) {
        warn!("editor login rejected");
        return error_response(StatusCode::UNAUTHORIZED, "wrong password");
    }

    let name = session::author_name(body.name.as_deref());
    let ttl_days = state.config.session_ttl_days;
    let token = match session::create_session(&state.pool, &name, ttl_days).await {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "session creation failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to create session");
        }
    };

    let secure = state.config.cookie_secure;
    let max_age = Duration::days(i64::from(ttl_days));
    let jar = jar
        .add(build_cookie(SESSION_COOKIE, token, true, secure, max_age))
        .add(build_cookie(AUTHOR_COOKIE, name.clone(), false, secure, max_age));

    info!(author = %name, "editor logged in");
    (jar, Json(LoginResponse { ok: true, name })).into_response()
}

/// `GET /api/auth`: whether the caller holds a live editor session.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(token) = session_token(&jar) else {
        return Json(AuthStatus::anonymous()).into_response();
    };

    match session::validate_session(&state.pool, token).await {
        Ok(Some(name)) => Json(AuthStatus { authenticated: true, name: Some(name) }).into_response(),
        Ok(None) => Json(AuthStatus::anonymous()).into_response(),
        Err(e) => {
            error!(error = %e, "session lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "session lookup failed")
        }
    }
}

/// `POST /api/auth/logout`: delete the session (if any) and clear both cookies.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = session_token(&jar) {
        if let Err(e) = session::delete_session(&state.pool, token).await {
            warn!(error = %e, "session delete failed");
        }
    }

    let secure = state.config.cookie_secure;
    let jar = jar
        .add(build_cookie(SESSION_COOKIE, String::new(), true, secure, Duration::ZERO))
        .add(build_cookie(AUTHOR_COOKIE, String::new(), false, secure, Duration::ZERO));
    (jar, StatusCode::NO_CONTENT)
}
