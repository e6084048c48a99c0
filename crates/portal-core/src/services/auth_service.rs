// ============================================================================
// Portal Core - Authentication Service
// File: crates/portal-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service: credential check and access token issuing

use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use portal_security::{JwtService, PasswordService};
use portal_shared::utils::mask_email;

use crate::domain::{User, UserRole};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for handling user login
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    jwt: JwtService,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, jwt: JwtService) -> Self {
        Self { user_repo, jwt }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let masked = mask_email(email);
        info!("Login attempt for email: {}", masked);

        // 1. Find user by email
        let user = self.user_repo.find_by_email(email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", masked);
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash).map_err(|e| {
            error!("Stored password hash unreadable for user {}: {}", user.id, e);
            DomainError::InvalidCredentials
        })?;

        if !password_valid {
            warn!("Login failed: invalid password for: {}", masked);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Check if user can login
        if !user.can_login() {
            warn!("Login failed: user {} is not active", user.id);
            return Err(DomainError::UserNotActive);
        }

        // 4. Issue token
        let access_token = self
            .jwt
            .generate_access_token(&user.id, user.role.as_str())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        // 5. Update last login
        let mut updated_user = user;
        updated_user.record_login();
        if let Err(e) = self.user_repo.record_login(&updated_user).await {
            error!("Failed to update last login: {}", e);
        }

        info!("Login successful for: {}", masked);

        Ok(LoginResult {
            user: UserInfo::from(&updated_user),
            access_token,
            expires_in: self.jwt.access_token_expiry(),
        })
    }

    /// Resolve the user behind an authenticated request
    pub async fn current_user(&self, user_id: &Uuid) -> Result<UserInfo, DomainError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        if !user.can_login() {
            return Err(DomainError::UserNotActive);
        }
        Ok(UserInfo::from(&user))
    }
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub access_token: String,
    pub expires_in: i64,
}

/// User info returned in auth responses
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
