//! Auth handlers: register, login, token exchange, logout, whoami.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use library_auth::NewAccount;
use library_entity::user::UserRole;

use crate::cookies::{expired_refresh_cookie, read_refresh_token, refresh_cookie};
use crate::dto::request::{LoginForm, RegisterRequest};
use crate::dto::response::{
    ACCESS_TOKEN_DETAIL, AccessTokenResponse, DetailResponse, UserResponse, WhoAmIResponse,
};
use crate::error::ApiError;
use crate::extractors::AccessUser;
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;

    let user = state
        .registration
        .register(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
            role: UserRole::User,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Json<DetailResponse>), ApiError> {
    form.validate()?;

    let outcome = state
        .session_manager
        .login(&form.username, &form.password)
        .await?;

    let max_age = state.session_manager.refresh_store().lifetime().num_seconds();
    let cookie = refresh_cookie(&state.auth_config, outcome.refresh_token.token, max_age);

    Ok((jar.add(cookie), Json(DetailResponse::new("Login successful"))))
}

/// POST /auth/token
pub async fn token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let value = read_refresh_token(&jar, &state.auth_config);
    let grant = state.session_manager.exchange(value.as_deref()).await?;

    Ok(Json(AccessTokenResponse {
        access_token: grant.access_token,
        detail: ACCESS_TOKEN_DETAIL.to_string(),
    }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<DetailResponse>), ApiError> {
    let value = read_refresh_token(&jar, &state.auth_config);
    state.session_manager.logout(value.as_deref()).await?;

    let jar = jar.add(expired_refresh_cookie(&state.auth_config));
    Ok((jar, Json(DetailResponse::new("Logout successful"))))
}

/// GET /auth/whoami
pub async fn whoami(AccessUser(user): AccessUser) -> Json<WhoAmIResponse> {
    Json(user.into())
}
