// ============================================================================
// Portal API - Bearer Authentication
// File: crates/portal-api/src/middleware/auth.rs
// ============================================================================

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use tracing::{debug, warn};
use uuid::Uuid;

use portal_core::domain::UserRole;

use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity decoded from a valid access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn require_editor(&self) -> Result<(), ApiError> {
        if self.role.can_edit_content() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Role '{}' may not modify content",
                self.role.as_str()
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Expected a Bearer token".into()))?;

        let claims = state.jwt.validate_token(token)?;
        let user_id = claims.user_id()?;
        let role = UserRole::parse(&claims.role).unwrap_or_else(|| {
            warn!("Token for {} carries unknown role '{}'", user_id, claims.role);
            UserRole::Viewer
        });

        debug!("Authenticated {} as {}", user_id, role.as_str());
        Ok(AuthUser { user_id, role })
    }
}
