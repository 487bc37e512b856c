use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};

use crate::{
    dto::auth_dto::{
        LoginPayload, MessageResponse, ProfileResponse, RegisterPayload, RegisterResponse,
        UpdateProfilePayload,
    },
    error::Result,
    middleware::auth::SESSION_COOKIE,
    utils::token::{Claims, TOKEN_TTL_HOURS},
    utils::validation::ValidJson,
    AppState,
};

fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}",
        SESSION_COOKIE,
        token,
        TOKEN_TTL_HOURS * 60 * 60
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn cleared_cookie(secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        SESSION_COOKIE
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let id = state.auth_service.register(payload.sanitized()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created!".into(),
            id,
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginPayload>,
) -> Result<impl IntoResponse> {
    let token = state.auth_service.login(payload.sanitized()).await?;
    let cookie = session_cookie(&token, state.session.secure_cookie);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Logged in successfully")),
    ))
}

/// Clears the cookie only; an issued token stays valid until it expires.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, cleared_cookie(state.session.secure_cookie))],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state.auth_service.profile(claims.id).await?;
    Ok(Json(ProfileResponse { user }))
}

/// Updates the caller's own account. A trailing `/:id` segment is accepted
/// but does not select the target.
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ValidJson(payload): ValidJson<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    state
        .auth_service
        .update_profile(claims.id, payload.sanitized())
        .await?;
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
