// ============================================================================
// Portal API - Topic Handlers
// File: crates/portal-api/src/handlers/topics.rs
// ============================================================================

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use portal_core::domain::TopicNode;

use crate::dto::{CreateTopicRequest, TopicTreeQuery};
use crate::error::ApiError;
use crate::handlers::AppJson;
use crate::middleware::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Filtered topic forest - GET /api/v1/topics/tree?search=
pub async fn topic_tree(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TopicTreeQuery>,
) -> Result<Json<ApiResponse<Vec<TopicNode>>>, ApiError> {
    query.validate()?;
    debug!("Topic tree requested by {} (search: {:?})", user.user_id, query.search);

    let tree = state.topics.tree(query.search.as_deref()).await?;
    Ok(Json(ApiResponse::success(tree)))
}

/// Create topic - POST /api/v1/topics
pub async fn create_topic(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateTopicRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TopicNode>>), ApiError> {
    user.require_editor()?;

    let draft = payload.into_draft()?;
    let node = state.topics.create(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(node))))
}
