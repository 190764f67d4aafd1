//! Principal extractors.
//!
//! - [`RefreshUser`] resolves the principal from the refresh token cookie.
//! - [`AccessUser`] resolves it from an `Authorization: Bearer` access token.
//! - [`AdminUser`] is a [`RefreshUser`] that must also hold the admin role.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use library_auth::require_admin;
use library_entity::user::User;

use crate::cookies::read_refresh_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Principal resolved from the refresh token cookie.
#[derive(Debug, Clone)]
pub struct RefreshUser(pub User);

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let value = read_refresh_token(&jar, &state.auth_config);

        let user = state
            .session_manager
            .verify_refresh(value.as_deref())
            .await?;
        Ok(Self(user))
    }
}

/// Principal resolved from a bearer access token.
#[derive(Debug, Clone)]
pub struct AccessUser(pub User);

impl FromRequestParts<AppState> for AccessUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = state
            .session_manager
            .verify_access(bearer_token(parts))
            .await?;
        Ok(Self(user))
    }
}

/// Admin principal resolved from the refresh token cookie.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RefreshUser(user) = RefreshUser::from_request_parts(parts, state).await?;
        Ok(Self(require_admin(user)?))
    }
}

/// The bearer token, if the header is present and uses the `Bearer` scheme.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
