// ============================================================================
// Portal API - Navigation Preference Handlers
// File: crates/portal-api/src/handlers/navigation.rs
// ============================================================================

use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::{NavigationResponse, SaveNavigationRequest};
use crate::error::ApiError;
use crate::handlers::AppJson;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/navigation
pub async fn get_navigation(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<NavigationResponse>>, ApiError> {
    let tree = state.navigation.load(&user.user_id).await?;
    Ok(Json(ApiResponse::success(NavigationResponse::from_tree(tree))))
}

/// PUT /api/v1/navigation
pub async fn save_navigation(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<SaveNavigationRequest>,
) -> Result<Json<ApiResponse<NavigationResponse>>, ApiError> {
    payload.validate()?;

    let tree = state.navigation.save(&user.user_id, &payload.into_entries()).await?;
    Ok(Json(ApiResponse::success(NavigationResponse::from_tree(tree))))
}

/// DELETE /api/v1/navigation
pub async fn reset_navigation(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<NavigationResponse>>, ApiError> {
    let tree = state.navigation.reset(&user.user_id).await?;
    Ok(Json(ApiResponse::success(NavigationResponse::from_tree(tree))))
}
