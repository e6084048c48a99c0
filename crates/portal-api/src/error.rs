// ============================================================================
// Portal API - Error Mapping
// File: crates/portal-api/src/error.rs
// ============================================================================
//! HTTP-facing errors rendered through the response envelope

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use portal_core::DomainError;
use portal_security::{JwtError, RateLimitExceeded};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests, retry after {retry_after_secs}s")]
    TooManyRequests { retry_after_secs: u64 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone())
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            ApiError::Validation(msg) => {
                tracing::warn!("Validation failed: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            ApiError::TooManyRequests { .. } => {
                tracing::warn!("{}", self);
                (StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_REQUESTS", self.to_string())
            }
            ApiError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                // storage details stay in the logs
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", "Database error".to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error".to_string())
            }
        };

        let mut response = (status, Json(ApiResponse::error(code, &message))).into_response();
        if let ApiError::TooManyRequests { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidCredentials => ApiError::Unauthorized("Invalid email or password".into()),
            DomainError::UserNotActive => ApiError::Forbidden("Account is not active".into()),
            DomainError::UserNotFound => ApiError::Unauthorized("User no longer exists".into()),
            DomainError::TopicSlugAlreadyExists(slug) => {
                ApiError::Conflict(format!("Topic slug already exists: {}", slug))
            }
            DomainError::ParentTopicNotFound(id) => {
                ApiError::NotFound(format!("Parent topic not found: {}", id))
            }
            DomainError::ValidationError(msg) => ApiError::Validation(msg),
            DomainError::DatabaseError(msg) => ApiError::Database(msg),
            DomainError::PasswordHashError(msg)
            | DomainError::TokenGenerationError(msg)
            | DomainError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => ApiError::Unauthorized("Token expired".into()),
            JwtError::ValidationError(_) => ApiError::Unauthorized("Invalid token".into()),
            JwtError::CreationError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<RateLimitExceeded> for ApiError {
    fn from(err: RateLimitExceeded) -> Self {
        ApiError::TooManyRequests {
            retry_after_secs: err.retry_after.as_secs().max(1),
        }
    }
}
