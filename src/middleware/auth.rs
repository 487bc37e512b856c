use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::models::user::Role;
use crate::utils::token::{self, Claims};
use crate::AppState;

pub const SESSION_COOKIE: &str = "token";

/// Value of the session cookie from the `Cookie` request header(s).
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Verifies the session cookie and attaches its [`Claims`] to the request.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = session_token(req.headers()) else {
        return Error::Unauthorized("You are not logged in".into()).into_response();
    };

    match token::verify(token, &state.session.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "session token rejected");
            Error::Unauthorized("Invalid token".into()).into_response()
        }
    }
}

/// Admin gate. The role is read from storage on every request rather than
/// trusted from the token, so a revoked role takes effect immediately.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(user_id) = req.extensions().get::<Claims>().map(|claims| claims.id) else {
        return Error::Unauthorized("You are not logged in".into()).into_response();
    };

    match state.auth_service.current_role(user_id).await {
        Ok(Some(Role::Admin)) => next.run(req).await,
        Ok(_) => {
            tracing::warn!(user_id, "admin route denied");
            Error::Forbidden("Access denied, admin only".into()).into_response()
        }
        Err(err) => err.into_response(),
    }
}
