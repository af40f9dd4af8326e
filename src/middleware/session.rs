//! Middleware used for identifying the requesting user and checking CSRF tokens.
use std::sync::LazyLock;

use crate::{
    constants::sessions::{CSRF_HEADER, SESSION_COOKIE},
    services::sessions::{UserSession, Viewer},
    state::AppState,
};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::CookieJar;

/// The status code used for a CSRF failure. 419 is non-standard but
///  it's what Laravel does.
#[expect(clippy::unwrap_used, reason = "This will never panic")]
static STATUS_CODE_BAD_CSRF: LazyLock<StatusCode> =
    LazyLock::new(|| StatusCode::from_u16(419).unwrap());

/// Middleware to parse a session cookie and identify the associated user.
/// Requests without a valid session continue as `Viewer::Anonymous`; only a
/// failing session store rejects the request.
pub async fn session_middleware(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let viewer = match cookie_jar.get(SESSION_COOKIE) {
        None => Viewer::Anonymous,
        Some(cookie) => UserSession::get(cookie.value(), &state.session_store)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Error loading session from store");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .map_or_else(
                || {
                    tracing::debug!("Unknown session token, continuing anonymously");
                    Viewer::Anonymous
                },
                Viewer::Authenticated,
            ),
    };
    req.extensions_mut().insert(viewer);
    Ok(next.run(req).await)
}

/// Require authenticated viewers to echo their session's CSRF token on
/// state-changing requests. Anonymous requests pass through untouched, since
/// they cannot change anything tied to a user. Must run inside
/// `session_middleware`.
pub async fn csrf_middleware(
    Extension(viewer): Extension<Viewer>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Viewer::Authenticated(ref session) = viewer {
        let csrf_token = req
            .headers()
            .get(CSRF_HEADER)
            .ok_or_else(|| {
                tracing::warn!("Request is missing {CSRF_HEADER}");
                *STATUS_CODE_BAD_CSRF
            })?
            .to_str()
            .map_err(|_err| {
                tracing::warn!("CSRF token contains non-ASCII.");
                StatusCode::BAD_REQUEST
            })?;
        if csrf_token != session.csrf_token() {
            tracing::warn!(user_id = %session.user_id(), "Incorrect {CSRF_HEADER} in request");
            return Err(*STATUS_CODE_BAD_CSRF);
        }
    }
    Ok(next.run(req).await)
}
