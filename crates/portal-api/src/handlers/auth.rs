// ============================================================================
// Portal API - Auth Handlers
// File: crates/portal-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login, current user)

use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::{LoginRequest, LoginResponse, UserDto};
use crate::error::ApiError;
use crate::handlers::AppJson;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    payload.validate()?;

    let result = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::success(result.into())))
}

/// Current user handler - GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let info = state.auth.current_user(&user.user_id).await?;
    Ok(Json(ApiResponse::success(info.into())))
}
