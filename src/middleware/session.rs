//! Cookie-carried pseudo-session.
//!
//! The "session" is the plain user id in an unsigned cookie; this only scopes
//! queries to one user, it is not an authentication mechanism.

use axum::{
    extract::Request,
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config;
use crate::error::ApiError;

/// Session context extracted from the request cookie.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub user_id: Uuid,
}

/// Rejects requests without a valid user-id cookie and injects [`SessionUser`]
/// into request extensions for downstream handlers.
pub async fn session_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let cookie_name = &config::config().session.cookie_name;

    let raw = cookie_value(request.headers(), cookie_name)
        .ok_or_else(|| ApiError::unauthorized("Missing session cookie, please log in first"))?;

    let user_id = Uuid::parse_str(&raw)
        .map_err(|_| ApiError::unauthorized("Invalid session cookie"))?;

    request.extensions_mut().insert(SessionUser { user_id });
    Ok(next.run(request).await)
}

/// Build the Set-Cookie value handed out on login.
pub fn session_cookie(user_id: Uuid) -> String {
    let session = &config::config().session;
    format!(
        "{}={}; Path=/; Max-Age={}",
        session.cookie_name, user_id, session.max_age_secs
    )
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}
