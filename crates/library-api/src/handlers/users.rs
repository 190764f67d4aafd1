//! User administration handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use library_auth::NewAccount;

use crate::dto::request::{ActivateMembershipRequest, BlockMembershipRequest, CreateUserRequest};
use crate::dto::response::{MembershipStatusResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AdminUser, RefreshUser};
use crate::state::AppState;

/// POST /users/create
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;

    let user = state
        .registration
        .register(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    tracing::info!(admin_id = admin.id, user_id = user.id, "User created by admin");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/me
pub async fn me(RefreshUser(user): RefreshUser) -> Json<UserResponse> {
    Json(user.into())
}

/// POST /users/membership/activate
pub async fn activate_membership(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(req): Json<ActivateMembershipRequest>,
) -> Result<Json<MembershipStatusResponse>, ApiError> {
    req.validate()?;

    let status = state
        .membership
        .activate(req.user_id, req.contact_information.as_deref())
        .await?;

    Ok(Json(MembershipStatusResponse {
        user_id: req.user_id,
        current_membership_status: status,
    }))
}

/// POST /users/membership/block
pub async fn block_membership(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(req): Json<BlockMembershipRequest>,
) -> Result<Json<MembershipStatusResponse>, ApiError> {
    let status = state.membership.block(req.user_id).await?;

    Ok(Json(MembershipStatusResponse {
        user_id: req.user_id,
        current_membership_status: status,
    }))
}
